//! Operations of the acquiring API, grouped by resource.
//!
//! Every operation is an `async fn` on [`Client`](crate::Client) that validates its
//! request, binds one fixed method and path, and decodes the typed response.

pub mod invoice;
pub mod merchant;
pub mod payment;
pub mod qr;
pub mod wallet;

#[cfg(test)]
pub(crate) fn test_client(server: &wiremock::MockServer) -> crate::Client {
    let config = crate::Config::new("test-token").with_base_url(server.uri());
    crate::Client::new(config).unwrap()
}
