//! URL construction for every API call.
//!
//! All paths go through [`Endpoints`], which always emits
//! `{base}{resource}/` for collections and `{base}{resource}/{id}/` for
//! items regardless of how the base or resource path were written.

use reqwest::Url;

use dreams_core::types::DbId;

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Parse the API base URL. A missing trailing slash is added.
    pub fn new(api_url: &str) -> ClientResult<Self> {
        let mut normalized = api_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base = Url::parse(&normalized)
            .map_err(|e| ClientError::Config(format!("Invalid API URL {api_url:?}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "API URL {api_url:?} cannot be used as a base"
            )));
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `{base}login/`
    pub fn login(&self) -> ClientResult<Url> {
        self.join("login/")
    }

    /// `{base}{resource}/`
    pub fn collection(&self, resource: &str) -> ClientResult<Url> {
        self.join(&format!("{}/", clean(resource)))
    }

    /// `{base}{resource}/{id}/`
    pub fn item(&self, resource: &str, id: DbId) -> ClientResult<Url> {
        self.join(&format!("{}/{id}/", clean(resource)))
    }

    /// `{base}{resource}/?event={event_id}`
    pub fn filtered_by_event(&self, resource: &str, event_id: DbId) -> ClientResult<Url> {
        let mut url = self.collection(resource)?;
        url.query_pairs_mut()
            .append_pair("event", &event_id.to_string());
        Ok(url)
    }

    fn join(&self, relative: &str) -> ClientResult<Url> {
        self.base
            .join(relative)
            .map_err(|e| ClientError::Config(format!("Invalid endpoint path {relative:?}: {e}")))
    }
}

/// Strip whitespace and surrounding slashes from a resource path.
fn clean(resource: &str) -> &str {
    resource.trim().trim_matches('/').trim()
}
