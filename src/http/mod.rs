mod method;
mod request;
mod response;
mod transport;

use std::{borrow::Cow, collections::HashMap};

pub type HeaderName = Cow<'static, str>;
pub type HeaderValue = Cow<'static, str>;
pub type Headers = HashMap<HeaderName, HeaderValue>;

pub use method::Method;
pub use request::{Body as RequestBody, Request, RequestBuilder, Uri};
pub use response::{Body as ResponseBody, Response, ResponseBuilder, StatusCode};
pub use transport::{PanickedTransport, Transport, TransportError, TransportResult};
