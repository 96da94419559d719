use std::{borrow::Cow, cmp::PartialEq, fmt, sync::Arc};

#[derive(Clone, Eq, PartialEq)]
struct CredentialInner {
    uid: Cow<'static, str>,
    secret: Cow<'static, str>,
}

#[derive(Clone, Eq)]
pub struct Credential(Arc<CredentialInner>);

impl Credential {
    pub fn new<Uid: Into<Cow<'static, str>>, Secret: Into<Cow<'static, str>>>(
        uid: Uid,
        secret: Secret,
    ) -> Credential {
        Credential(Arc::new(CredentialInner {
            uid: uid.into(),
            secret: secret.into(),
        }))
    }

    pub fn uid(&self) -> &str {
        self.0.uid.as_ref()
    }

    pub(crate) fn secret(&self) -> &str {
        self.0.secret.as_ref()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_fmt(format_args!(
            "Credential {{ uid: {:?}, secret: CENSORED }}",
            &self.uid()
        ))
    }
}

impl PartialEq for Credential {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_shared_credential() {
        let credential = Credential::new("user1", "u5QtPuQx+W5nrrQQEg7nArBqSgC8qLiDt2RhQthb");
        let mut threads = Vec::new();
        for _ in 0..2 {
            let credential = credential.clone();
            threads.push(thread::spawn(move || {
                assert_eq!(credential.uid(), "user1");
                assert_eq!(credential.secret(), "u5QtPuQx+W5nrrQQEg7nArBqSgC8qLiDt2RhQthb");
            }));
        }
        threads.into_iter().for_each(|thread| thread.join().unwrap());
    }

    #[test]
    fn test_censored_secret() {
        let credential = Credential::new("user1", "topsecret");
        let repr = format!("{:?}", credential);
        assert!(repr.contains("user1"));
        assert!(!repr.contains("topsecret"));
    }
}
