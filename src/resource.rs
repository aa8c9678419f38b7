use url::Url;

/// Just a wrapper around a site URL and credentials
#[derive(Clone)]
pub struct Resource {
    url: Url,
    username: String,
    password: String,
}

impl Resource {
    pub fn new(url: Url, username: String, password: String) -> Self {
        Self { url, username, password }
    }

    pub fn url(&self) -> &Url { &self.url }
    pub fn username(&self) -> &String { &self.username }
    pub fn password(&self) -> &String { &self.password }

    /// URL of a named record collection under this site
    pub fn collection(&self, name: &str) -> Url {
        let mut built = self.url.clone();
        if let Ok(mut segments) = built.path_segments_mut() {
            segments.pop_if_empty().push(name);
        }
        built
    }

    /// URL of one item within a named collection, e.g. `.../Projects(3)`
    pub fn item(&self, collection: &str, id: i64) -> Url {
        self.collection(&format!("{}({})", collection, id))
    }
}
