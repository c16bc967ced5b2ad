/// A single HTTP header as it appeared on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An intercepted outbound request.
///
/// Values are never mutated in place: [`Request::with_updated_header`]
/// returns a modified copy and leaves `self` untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: String,
    path: String,
    headers: Vec<Header>,
    body: Vec<u8>,
}

impl Request {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(name, value));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Whether a header named exactly `name` is present, ignoring
    /// surrounding whitespace in the header's name. Case-sensitive.
    pub fn has_header_named(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h.name.trim() == name)
    }

    /// Value of the first header matching `name` case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.trim().eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Returns a copy with the first header matching `name`
    /// (trimmed, case-insensitive) set to `value`, or with the header
    /// appended if none matches.
    pub fn with_updated_header(&self, name: &str, value: impl Into<String>) -> Self {
        let mut updated = self.clone();
        let value = value.into();
        match updated
            .headers
            .iter()
            .position(|h| h.name.trim().eq_ignore_ascii_case(name))
        {
            Some(index) => updated.headers[index].value = value,
            None => updated.headers.push(Header::new(name, value)),
        }
        updated
    }
}

/// A response received by the host pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<Header>,
    pub body: Vec<u8>,
}

/// What the host should do with a received response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseAction {
    Continue(Response),
}

impl ResponseAction {
    pub fn into_response(self) -> Response {
        match self {
            ResponseAction::Continue(response) => response,
        }
    }
}
