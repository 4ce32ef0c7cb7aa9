//! Authentication endpoint

use carecheck_core::dto::auth::{LoginRequest, LoginResponse};
use reqwest::Method;

use crate::SchedulingClient;
use crate::error::Result;

impl SchedulingClient {
    /// Exchange credentials for a bearer token
    ///
    /// # Arguments
    /// * `req` - Username and password
    ///
    /// # Returns
    /// The access token exactly as issued, possibly empty. Judging whether a
    /// token is plausible is left to the caller.
    pub async fn login(&self, req: &LoginRequest) -> Result<String> {
        let response = self
            .request(Method::POST, "/api/master/login")
            .json(req)
            .send()
            .await?;

        let login: LoginResponse = self.handle_response(response).await?;
        Ok(login.data.access_token)
    }
}
