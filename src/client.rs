use std::net::SocketAddr;

use serde::Serialize;

use crate::command::{KeyRequest, UpsertRequest};
use crate::error::ErrorResponse;
use crate::server::{DELETE_PATH, GET_PATH, UPSERT_PATH};
use crate::{Entity, Result, SquaresError};

/// `SquaresClient` contains the functionality for communication with a [`SquaresServer`]
///
/// [`SquaresServer`]: ./struct.SquaresServer.html
pub struct SquaresClient {
    base_url: String,
    agent: ureq::Agent,
}

impl SquaresClient {
    /// creates a client for the server at the given `addr`. No connection is made until the
    /// first request.
    pub fn new(addr: SocketAddr) -> Self {
        SquaresClient {
            base_url: format!("http://{}", addr),
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    /// creates or replaces an entity on the server
    /// # Returns
    /// the server's confirmation, e.g. `Entity infinityOne/a@b.com saved.`
    /// # Errors
    /// `Err<SquaresError::Remote>` if the server could not save the entity
    pub fn set(&self, req: &UpsertRequest) -> Result<String> {
        Ok(self.post(UPSERT_PATH, req)?.into_string()?)
    }

    /// gets the entity stored at the requested key
    /// ## Returns
    /// `Ok<Entity>` if an entity was found.
    /// `Err<SquaresError::Remote>` if no entity exists or an error occurred when retrieving it
    pub fn get(&self, req: &KeyRequest) -> Result<Entity> {
        Ok(self.post(GET_PATH, req)?.into_json()?)
    }

    /// removes an entity from the store
    /// # Returns
    /// the server's confirmation, e.g. `Entity infinityOne/a@b.com deleted.`
    pub fn remove(&self, req: &KeyRequest) -> Result<String> {
        Ok(self.post(DELETE_PATH, req)?.into_string()?)
    }

    fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<ureq::Response> {
        let url = format!("{}{}", self.base_url, path);
        match self.agent.post(&url).send_json(body) {
            Ok(resp) => Ok(resp),
            // re-throwing the server's error message here
            Err(ureq::Error::Status(status, resp)) => {
                let text = resp.into_string()?;
                match serde_json::from_str::<ErrorResponse>(&text) {
                    Ok(body) => Err(SquaresError::Remote(body.error)),
                    // not one of ours, e.g. a 404 from a wrong address or a proxy
                    Err(_) => Err(SquaresError::Remote(format!("{}: {}", status, text))),
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}
