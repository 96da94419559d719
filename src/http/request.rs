use super::{HeaderName, HeaderValue, Headers, Method};
use getset::{Getters, MutGetters, Setters};

pub type Uri = String;
pub type Body = Vec<u8>;

#[derive(Debug, Getters, Setters, MutGetters, Clone, Default)]
#[get = "pub"]
#[set = "pub"]
#[get_mut = "pub"]
pub struct Request {
    uri: Uri,
    method: Method,
    headers: Headers,
    body: Option<Body>,
}

impl Request {
    pub fn new<U: Into<Uri>>(method: Method, uri: U, headers: Headers, body: Option<Body>) -> Request {
        Request {
            uri: uri.into(),
            method,
            headers,
            body,
        }
    }

    pub fn header<N: Into<HeaderName>>(&self, header_name: N) -> Option<&HeaderValue> {
        self.headers.get(&header_name.into())
    }

    pub fn into_parts(self) -> (Uri, Method, Headers, Option<Body>) {
        (self.uri, self.method, self.headers, self.body)
    }
}

pub struct RequestBuilder {
    request: Request,
}

impl RequestBuilder {
    pub fn default() -> RequestBuilder {
        RequestBuilder {
            request: Default::default(),
        }
    }

    pub fn method(mut self, method: Method) -> RequestBuilder {
        self.request.method = method;
        self
    }

    pub fn uri<U: Into<Uri>>(mut self, uri: U) -> RequestBuilder {
        self.request.uri = uri.into();
        self
    }

    pub fn header<N: Into<HeaderName>, V: Into<HeaderValue>>(
        mut self,
        header_name: N,
        header_value: V,
    ) -> RequestBuilder {
        self.request.headers.insert(header_name.into(), header_value.into());
        self
    }

    pub fn headers(mut self, headers: Headers) -> RequestBuilder {
        self.request.headers = headers;
        self
    }

    pub fn body<B: Into<Body>>(mut self, body: B) -> RequestBuilder {
        self.request.body = Some(body.into());
        self
    }

    pub fn build(self) -> Request {
        self.request
    }
}
