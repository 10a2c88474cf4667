//! Parsing of router paths of the form `/:tab(s|f|m)/:id/:mainApp?` with an
//! optional `?sub=<app>` query.

use teeplatform_bridge::tags::{AppKind, ParseTagError, ResourceType};

/// Errors that can occur while parsing a router path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// The path lacks the resource code or the resource id segment.
    #[error("route `{0}` is missing a resource segment")]
    MissingSegment(String),
    /// The path has segments past the main application.
    #[error("route `{0}` has unexpected trailing segments")]
    TrailingSegments(String),
    /// A segment or query value does not name a known tag.
    #[error("invalid route: {0}")]
    InvalidTag(#[from] ParseTagError),
}

/// A parsed router location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub resource_type: ResourceType,
    pub resource_id: String,
    pub main_app: Option<AppKind>,
    pub sub_app: Option<AppKind>,
}

impl Route {
    pub fn parse(location: &str) -> Result<Self, RouteError> {
        let (path, query) = match location.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (location, None),
        };

        let mut segments = path.split('/').filter(|segment| !segment.is_empty());
        let code = segments
            .next()
            .ok_or_else(|| RouteError::MissingSegment(location.to_string()))?;
        let resource_type = ResourceType::from_url_code(code)?;
        let resource_id = segments
            .next()
            .ok_or_else(|| RouteError::MissingSegment(location.to_string()))?
            .to_string();
        let main_app = segments.next().map(str::parse::<AppKind>).transpose()?;
        if segments.next().is_some() {
            return Err(RouteError::TrailingSegments(location.to_string()));
        }

        let sub_app = query
            .into_iter()
            .flat_map(|query| query.split('&'))
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "sub")
            .map(|(_, value)| value.parse::<AppKind>())
            .transpose()?;

        Ok(Self {
            resource_type,
            resource_id,
            main_app,
            sub_app,
        })
    }

    /// Renders the route back into a router path.
    pub fn to_path(&self) -> String {
        let code = self.resource_type.url_code().unwrap_or_default();
        let mut path = format!("/{code}/{}", self.resource_id);
        if let Some(app) = self.main_app {
            path.push('/');
            path.push_str(app.as_str());
        }
        if let Some(app) = self.sub_app {
            path.push_str("?sub=");
            path.push_str(app.as_str());
        }
        path
    }
}
