use crate::credential::Credential;
use assert_impl::assert_impl;
use std::{fmt, sync::RwLock};

/// 鉴权会话
///
/// 缓存最近一次下发的令牌与存储端点，令牌整体替换，读取方不会观察到中间状态
pub struct AuthSession {
    credential: Credential,
    token: RwLock<Option<Box<str>>>,
    storage_url: RwLock<Option<Box<str>>>,
}

impl AuthSession {
    pub fn new(credential: Credential) -> AuthSession {
        AuthSession {
            credential,
            token: RwLock::new(None),
            storage_url: RwLock::new(None),
        }
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn token(&self) -> Option<Box<str>> {
        self.token.read().unwrap().clone()
    }

    pub fn storage_url(&self) -> Option<Box<str>> {
        self.storage_url.read().unwrap().clone()
    }

    pub(crate) fn update(&self, token: Box<str>, storage_url: Option<Box<str>>) {
        *self.token.write().unwrap() = Some(token);
        if storage_url.is_some() {
            *self.storage_url.write().unwrap() = storage_url;
        }
    }

    #[allow(dead_code)]
    fn ignore() {
        assert_impl!(Send: Self);
        assert_impl!(Sync: Self);
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("credential", &self.credential)
            .field("token", &self.token.read().unwrap().is_some())
            .field("storage_url", &self.storage_url.read().unwrap())
            .finish()
    }
}
