use crate::proxy::ProxyEndpoint;

/// Round-robin cursor over the configured proxy endpoints
///
/// The endpoint list is fixed for the run. Rotation is independent of whether
/// the requests made through a proxy succeed.
#[derive(Debug, Clone, Default)]
pub struct ProxyRotator {
    endpoints: Vec<ProxyEndpoint>,
    cursor: usize,
}

impl ProxyRotator {
    /// Creates a rotator positioned on the first endpoint
    pub fn new(endpoints: Vec<ProxyEndpoint>) -> Self {
        Self {
            endpoints,
            cursor: 0,
        }
    }

    /// A rotator with no endpoints: every call returns `None`
    pub fn direct() -> Self {
        Self::default()
    }

    /// The endpoint under the cursor, or `None` for a direct connection
    pub fn current(&self) -> Option<&ProxyEndpoint> {
        self.endpoints.get(self.cursor)
    }

    /// Moves the cursor forward circularly and returns the new endpoint
    pub fn advance(&mut self) -> Option<&ProxyEndpoint> {
        if self.endpoints.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + 1) % self.endpoints.len();
        self.endpoints.get(self.cursor)
    }

    /// All endpoints, in configuration order
    pub fn endpoints(&self) -> &[ProxyEndpoint] {
        &self.endpoints
    }

    /// Returns true if no proxies are configured
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
