use super::{api, auth::AuthSession, listing};
use crate::{
    config::Config,
    credential::Credential,
    error::{Error, Result},
    http::{Headers, Method, Request, TransportError},
    item::{DataItem, ItemFactory},
    task::{CompositeDataIoTask, DataIoTask, IoTaskRef, IoType, PartialDataIoTask},
};
use assert_impl::assert_impl;
use log::{debug, warn};
use std::io::Read;

/// Swift 存储驱动
///
/// 把 I/O 任务映射为 Swift REST API 请求，并承担鉴权会话与容器管理。
/// 请求的发送与响应的接收由外部传输层完成，驱动本身不阻塞在网络 I/O 上。
pub struct SwiftStorageDriver {
    config: Config,
    auth: AuthSession,
}

impl SwiftStorageDriver {
    pub fn new(credential: Credential, config: Config) -> SwiftStorageDriver {
        SwiftStorageDriver {
            auth: AuthSession::new(credential),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn auth(&self) -> &AuthSession {
        &self.auth
    }

    pub fn build_request<'t>(
        &self,
        task: impl Into<IoTaskRef<'t>>,
        target_addr: &str,
    ) -> Result<Request> {
        match task.into() {
            IoTaskRef::Data(task) => self.data_request(task, target_addr),
            IoTaskRef::Partial(task) => self.part_request(task, target_addr),
            IoTaskRef::Composite(task) => self.manifest_request(task, target_addr),
        }
    }

    pub fn request_new_auth_token(&self, credential: &Credential) -> Result<()> {
        let target_addr = self.primary_node()?;
        let mut headers = self.base_headers(target_addr, 0);
        headers.insert(api::KEY_X_AUTH_USER.into(), credential.uid().to_owned().into());
        headers.insert(api::KEY_X_AUTH_KEY.into(), credential.secret().to_owned().into());
        let request = Request::new(Method::GET, self.config.auth_uri(), headers, None);
        let response = self.config.transport().call(&request)?;
        if !response.is_success() {
            return Err(Error::AuthFailure {
                status: response.status_code(),
            });
        }
        let token = response
            .header(api::KEY_X_AUTH_TOKEN)
            .map(|value| value.as_ref().into())
            .ok_or_else(|| Error::ProtocolMismatch {
                method: Method::GET,
                uri: self.config.auth_uri().into(),
                status: response.status_code(),
            })?;
        let storage_url = response
            .header(api::KEY_X_STORAGE_URL)
            .map(|value| value.as_ref().into());
        debug!("new auth token acquired for user {}", credential.uid());
        self.auth.update(token, storage_url);
        Ok(())
    }

    /// Issues one HEAD when the container exists, a HEAD and a PUT when it
    /// has to be created. Callers rely on that request count.
    pub fn ensure_container(&self, container: &str) -> Result<String> {
        let target_addr = self.primary_node()?;
        let uri = api::container_uri(self.config.uri_base(), self.config.namespace(), container);
        let check = Request::new(
            Method::HEAD,
            uri.clone(),
            self.authed_headers(target_addr, 0),
            None,
        );
        let response = self.config.transport().call(&check)?;
        if response.status_code() == 404 {
            let mut headers = self.authed_headers(target_addr, 0);
            if self.config.versioning() {
                headers.insert(
                    api::KEY_X_VERSIONS_LOCATION.into(),
                    self.config.versions_location().into(),
                );
            }
            let create = Request::new(Method::PUT, uri.clone(), headers, None);
            let response = self.config.transport().call(&create)?;
            if !response.is_success() {
                return Err(Error::ProtocolMismatch {
                    method: Method::PUT,
                    uri: uri.into(),
                    status: response.status_code(),
                });
            }
            debug!("container {} created", container);
        } else if !response.is_success() {
            return Err(Error::ProtocolMismatch {
                method: Method::HEAD,
                uri: uri.into(),
                status: response.status_code(),
            });
        }
        Ok(container.to_owned())
    }

    /// One GET per call, the caller paginates by advancing the marker item.
    pub fn list<F: ItemFactory>(
        &self,
        item_factory: &F,
        container: &str,
        prefix: Option<&str>,
        id_radix: u32,
        marker_item: Option<&DataItem>,
        limit: u32,
    ) -> Result<Vec<F::Item>> {
        let target_addr = self.primary_node()?;
        let uri = api::listing_uri(
            self.config.uri_base(),
            self.config.namespace(),
            container,
            prefix,
            marker_item.map(|item| item.id()),
            Some(limit),
        );
        let request = Request::new(
            Method::GET,
            uri.clone(),
            self.authed_headers(target_addr, 0),
            None,
        );
        let mut response = self.config.transport().call(&request)?;
        if !response.is_success() {
            return Err(Error::ProtocolMismatch {
                method: Method::GET,
                uri: uri.into(),
                status: response.status_code(),
            });
        }
        let entries = match response.take_body() {
            Some(mut body) if response.status_code() != 204 => {
                let mut raw = Vec::new();
                body.read_to_end(&mut raw).map_err(TransportError::from)?;
                if raw.iter().all(|byte| byte.is_ascii_whitespace()) {
                    Vec::new()
                } else {
                    listing::parse_listing(&raw[..])?
                }
            }
            _ => Vec::new(),
        };
        let mut items = Vec::with_capacity(entries.len());
        for entry in entries {
            match i64::from_str_radix(&entry.name, id_radix) {
                Ok(numeric_id) => items.push(item_factory.make_item(&entry.name, numeric_id, entry.bytes)),
                Err(_) => warn!(
                    "skipping the listing entry {:?} whose id is not a radix {} number",
                    entry.name, id_radix
                ),
            }
        }
        Ok(items)
    }

    fn data_request(&self, task: &DataIoTask, target_addr: &str) -> Result<Request> {
        let config = &self.config;
        let uri = api::object_uri(
            config.uri_base(),
            config.namespace(),
            task.dst_path(),
            task.item().id(),
        );
        match task.io_type() {
            IoType::Create => {
                if let Some(src_path) = task.src_path() {
                    // server side copies carry no body
                    let mut headers = self.authed_headers(target_addr, 0);
                    headers.insert(
                        api::KEY_X_COPY_FROM.into(),
                        api::object_uri(
                            config.uri_base(),
                            config.namespace(),
                            src_path,
                            task.item().id(),
                        )
                        .into(),
                    );
                    Ok(Request::new(Method::PUT, uri, headers, None))
                } else {
                    Ok(Request::new(
                        Method::PUT,
                        uri,
                        self.authed_headers(target_addr, task.item().size()),
                        None,
                    ))
                }
            }
            IoType::Update => Ok(Request::new(
                Method::PUT,
                uri,
                self.authed_headers(target_addr, task.item().size()),
                None,
            )),
            IoType::Read => {
                let mut headers = self.authed_headers(target_addr, 0);
                if let Some(range) = task.range().filter(|range| range.len() > 0) {
                    headers.insert(
                        "Range".into(),
                        format!(
                            "bytes={}-{}",
                            range.offset(),
                            range.offset() + range.len() - 1
                        )
                        .into(),
                    );
                }
                Ok(Request::new(Method::GET, uri, headers, None))
            }
            IoType::Delete => Ok(Request::new(
                Method::DELETE,
                uri,
                self.authed_headers(target_addr, 0),
                None,
            )),
            IoType::List => Ok(Request::new(
                Method::GET,
                api::listing_uri(
                    config.uri_base(),
                    config.namespace(),
                    task.dst_path(),
                    None,
                    None,
                    None,
                ),
                self.authed_headers(target_addr, 0),
                None,
            )),
            IoType::Noop => Err(Error::StateViolation(
                "noop tasks do not issue requests".to_owned(),
            )),
        }
    }

    fn part_request(&self, task: &PartialDataIoTask, target_addr: &str) -> Result<Request> {
        let range = task.range().ok_or_else(|| {
            Error::StateViolation("a partial task must carry its byte range".to_owned())
        })?;
        let uri = api::part_uri(
            self.config.uri_base(),
            self.config.namespace(),
            task.dst_path(),
            task.item().id(),
            task.part_number(),
            self.config.part_number_width(),
        );
        Ok(Request::new(
            Method::PUT,
            uri,
            self.authed_headers(target_addr, range.len()),
            None,
        ))
    }

    fn manifest_request(&self, task: &CompositeDataIoTask, target_addr: &str) -> Result<Request> {
        if task.aborted() {
            return Err(Error::StateViolation(
                "the composite task was aborted, its manifest must not be requested".to_owned(),
            ));
        }
        if !task.all_sub_tasks_done() {
            return Err(Error::StateViolation(
                "the manifest may be requested only after every part succeeded".to_owned(),
            ));
        }
        let uri = api::object_uri(
            self.config.uri_base(),
            self.config.namespace(),
            task.dst_path(),
            task.item().id(),
        );
        let mut headers = self.authed_headers(target_addr, 0);
        headers.insert(
            api::KEY_X_OBJECT_MANIFEST.into(),
            api::manifest_value(task.dst_path(), task.item().id()).into(),
        );
        Ok(Request::new(Method::PUT, uri, headers, None))
    }

    fn base_headers(&self, target_addr: &str, content_length: u64) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Host".into(), target_addr.to_owned().into());
        headers.insert("Content-Length".into(), content_length.to_string().into());
        headers.insert("Date".into(), api::http_date().into());
        headers
    }

    fn authed_headers(&self, target_addr: &str, content_length: u64) -> Headers {
        let mut headers = self.base_headers(target_addr, content_length);
        if let Some(token) = self.auth.token() {
            headers.insert(api::KEY_X_AUTH_TOKEN.into(), String::from(token).into());
        }
        headers
    }

    fn primary_node(&self) -> Result<&str> {
        self.config
            .node_addrs()
            .first()
            .map(|addr| addr.as_ref())
            .ok_or_else(|| Error::StateViolation("no storage node address is configured".to_owned()))
    }

    #[allow(dead_code)]
    fn ignore() {
        assert_impl!(Send: Self);
        assert_impl!(Sync: Self);
    }
}
