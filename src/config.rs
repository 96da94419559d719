use crate::http::{PanickedTransport, Transport};
use assert_impl::assert_impl;
use derive_builder::Builder;
use getset::{CopyGetters, Getters};
use std::{boxed::Box, default::Default, fmt, marker::{Send, Sync}, ops::Deref, sync::Arc};

#[derive(Builder, Getters, CopyGetters)]
#[builder(
    name = "ConfigBuilder",
    pattern = "owned",
    public,
    build_fn(name = "inner_build", private)
)]
pub struct ConfigInner {
    #[get = "pub"]
    #[builder(setter(into))]
    #[builder(default = "default::namespace()")]
    namespace: Box<str>,

    #[get_copy = "pub"]
    #[builder(setter(into))]
    #[builder(default = "default::uri_base()")]
    uri_base: &'static str,

    #[get_copy = "pub"]
    #[builder(setter(into))]
    #[builder(default = "default::auth_uri()")]
    auth_uri: &'static str,

    #[get_copy = "pub"]
    #[builder(default = "default::versioning()")]
    versioning: bool,

    #[get_copy = "pub"]
    #[builder(setter(into))]
    #[builder(default = "default::versions_location()")]
    versions_location: &'static str,

    #[get_copy = "pub"]
    #[builder(default = "default::part_size()")]
    part_size: u64,

    #[get_copy = "pub"]
    #[builder(default = "default::part_number_width()")]
    part_number_width: usize,

    #[get = "pub"]
    #[builder(default = "default::node_addrs()")]
    node_addrs: Vec<Box<str>>,

    #[get = "pub"]
    #[builder(default = "default::transport()")]
    transport: Box<dyn Transport + Send + Sync>,
}

pub mod default {
    use super::*;

    pub fn namespace() -> Box<str> {
        "AUTH_test".into()
    }

    pub fn uri_base() -> &'static str {
        "/v1"
    }

    pub fn auth_uri() -> &'static str {
        "/auth/v1.0"
    }

    pub fn versioning() -> bool {
        false
    }

    pub fn versions_location() -> &'static str {
        "archive"
    }

    pub fn part_size() -> u64 {
        1 << 22
    }

    pub fn part_number_width() -> usize {
        7
    }

    pub fn node_addrs() -> Vec<Box<str>> {
        vec!["127.0.0.1:9024".into()]
    }

    pub fn transport() -> Box<dyn Transport + Send + Sync> {
        Box::new(PanickedTransport("Must define config.transport"))
    }
}

impl fmt::Debug for ConfigInner {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Config")
            .field("namespace", &self.namespace)
            .field("uri_base", &self.uri_base)
            .field("auth_uri", &self.auth_uri)
            .field("versioning", &self.versioning)
            .field("versions_location", &self.versions_location)
            .field("part_size", &self.part_size)
            .field("part_number_width", &self.part_number_width)
            .field("node_addrs", &self.node_addrs)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct Config(Arc<ConfigInner>);

impl ConfigBuilder {
    pub fn build(self) -> Config {
        Config(Arc::new(self.inner_build().unwrap()))
    }
}

impl Default for Config {
    fn default() -> Self {
        ConfigBuilder::default().build()
    }
}

impl Deref for Config {
    type Target = ConfigInner;

    #[inline]
    fn deref(&self) -> &ConfigInner {
        self.0.deref()
    }
}

impl Config {
    #[allow(dead_code)]
    fn ignore() {
        assert_impl!(Send: Self);
        assert_impl!(Sync: Self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{Request, RequestBuilder, ResponseBuilder, Transport, TransportResult};
    use std::{error::Error, io::{Cursor, Read}, result::Result as StdResult};

    struct FakeTransport;
    impl Transport for FakeTransport {
        fn call(&self, _: &Request) -> TransportResult {
            Ok(ResponseBuilder::default()
                .status_code(204u16)
                .stream(Cursor::new(Vec::from("[]".as_bytes())))
                .build())
        }
    }

    #[test]
    fn test_config_with_set_transport() -> StdResult<(), Box<dyn Error>> {
        let config = ConfigBuilder::default()
            .namespace("ns1")
            .transport(Box::new(FakeTransport))
            .build();

        let response = config
            .transport()
            .call(&RequestBuilder::default().uri("/auth/v1.0").build())?;

        assert_eq!(response.status_code(), 204);
        let mut body = String::new();
        response.into_body().unwrap().read_to_string(&mut body)?;
        assert_eq!(body, "[]");
        Ok(())
    }

    #[test]
    fn test_config_with_getters() {
        let config = ConfigBuilder::default()
            .namespace("ns1")
            .versioning(true)
            .part_size(1234u64)
            .build();
        assert_eq!(config.namespace().as_ref(), "ns1");
        assert_eq!(config.uri_base(), "/v1");
        assert_eq!(config.auth_uri(), "/auth/v1.0");
        assert!(config.versioning());
        assert_eq!(config.versions_location(), "archive");
        assert_eq!(config.part_size(), 1234);
        assert_eq!(config.part_number_width(), 7);
    }
}
