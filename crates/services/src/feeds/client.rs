use std::time::Duration;

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;

use super::ports::{FeedError, FeedItem, FeedReader};

const UNTITLED: &str = "Untitled";

// ---------------------------------------------------------------------------
// RSS 2.0 (<rss><channel><item>) and RSS 1.0 (<rdf:RDF><item>)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RssDocument {
    channel: RssChannel,
}

#[derive(Debug, Deserialize)]
struct RssChannel {
    #[serde(default, rename = "item")]
    items: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
struct RdfDocument {
    #[serde(default, rename = "item")]
    items: Vec<RssItem>,
}

// Fields match on the local name, so `<title>` and `<media:title>` land in the
// same field. Every child is collected as a list and the first non-empty value wins.
#[derive(Debug, Deserialize)]
struct RssItem {
    #[serde(default, rename = "title")]
    titles: Vec<XmlText>,
    #[serde(default, rename = "link")]
    links: Vec<XmlLink>,
    #[serde(default, rename = "summary")]
    summaries: Vec<XmlText>,
    #[serde(default, rename = "description")]
    descriptions: Vec<XmlText>,
    #[serde(default, rename = "pubDate")]
    pub_dates: Vec<XmlText>,
    /// `dc:date` in RSS 1.0
    #[serde(default, rename = "date")]
    dates: Vec<XmlText>,
}

impl RssItem {
    /// Element text first (`<link>url</link>`), then an `href` attribute (`<atom:link href=..>`)
    fn primary_link(&self) -> Option<String> {
        let text = self.links.iter().map(|l| l.text.as_str());
        let href = self.links.iter().map(|l| l.href.as_str());
        text.chain(href)
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(str::to_string)
    }
}

impl From<RssItem> for FeedItem {
    fn from(item: RssItem) -> Self {
        Self {
            link: item.primary_link().unwrap_or_default(),
            title: first_text(item.titles).unwrap_or_else(|| UNTITLED.to_string()),
            summary: first_text(item.summaries)
                .or_else(|| first_text(item.descriptions))
                .unwrap_or_default(),
            published: first_text(item.pub_dates)
                .or_else(|| first_text(item.dates))
                .unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Atom (<feed><entry>)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(default, rename = "entry")]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    #[serde(default, rename = "title")]
    titles: Vec<XmlText>,
    #[serde(default, rename = "link")]
    links: Vec<XmlLink>,
    #[serde(default, rename = "summary")]
    summaries: Vec<XmlText>,
    #[serde(default, rename = "content")]
    contents: Vec<XmlText>,
    #[serde(default)]
    published: Vec<XmlText>,
    #[serde(default)]
    updated: Vec<XmlText>,
}

/// Element text; attributes such as `type` are ignored
#[derive(Debug, Deserialize)]
struct XmlText {
    #[serde(rename = "$text", default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct XmlLink {
    #[serde(rename = "$text", default)]
    text: String,
    #[serde(rename = "@href", default)]
    href: String,
    #[serde(rename = "@rel")]
    rel: Option<String>,
}

impl AtomEntry {
    /// The `alternate` link, or the first link when none is marked
    fn primary_link(&self) -> Option<&str> {
        self.links
            .iter()
            .filter(|l| !l.href.trim().is_empty())
            .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
            .or_else(|| self.links.iter().find(|l| !l.href.trim().is_empty()))
            .map(|l| l.href.trim())
    }
}

impl From<AtomEntry> for FeedItem {
    fn from(entry: AtomEntry) -> Self {
        Self {
            link: entry.primary_link().unwrap_or_default().to_string(),
            title: first_text(entry.titles).unwrap_or_else(|| UNTITLED.to_string()),
            summary: first_text(entry.summaries)
                .or_else(|| first_text(entry.contents))
                .unwrap_or_default(),
            published: first_text(entry.published)
                .or_else(|| first_text(entry.updated))
                .unwrap_or_default(),
        }
    }
}

fn first_text(values: Vec<XmlText>) -> Option<String> {
    values
        .into_iter()
        .map(|t| t.value.trim().to_string())
        .find(|v| !v.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeedKind {
    Rss,
    Rdf,
    Atom,
}

/// Look at the root element to tell the feed dialects apart
fn detect_kind(xml: &str) -> Result<FeedKind, FeedError> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return match e.local_name().as_ref() {
                    b"rss" => Ok(FeedKind::Rss),
                    b"RDF" => Ok(FeedKind::Rdf),
                    b"feed" => Ok(FeedKind::Atom),
                    other => Err(FeedError::Malformed(format!(
                        "unexpected root element <{}>",
                        String::from_utf8_lossy(other)
                    ))),
                };
            }
            Ok(Event::Eof) => return Err(FeedError::Malformed("document is empty".to_string())),
            Ok(_) => continue,
            Err(e) => return Err(FeedError::Malformed(e.to_string())),
        }
    }
}

/// Parse an RSS or Atom document into at most `limit` items
pub fn parse_feed(xml: &str, limit: usize) -> Result<Vec<FeedItem>, FeedError> {
    let malformed = |e: quick_xml::DeError| FeedError::Malformed(e.to_string());

    let items: Vec<FeedItem> = match detect_kind(xml)? {
        FeedKind::Rss => quick_xml::de::from_str::<RssDocument>(xml)
            .map_err(malformed)?
            .channel
            .items
            .into_iter()
            .take(limit)
            .map(FeedItem::from)
            .collect(),
        FeedKind::Rdf => quick_xml::de::from_str::<RdfDocument>(xml)
            .map_err(malformed)?
            .items
            .into_iter()
            .take(limit)
            .map(FeedItem::from)
            .collect(),
        FeedKind::Atom => quick_xml::de::from_str::<AtomFeed>(xml)
            .map_err(malformed)?
            .entries
            .into_iter()
            .take(limit)
            .map(FeedItem::from)
            .collect(),
    };

    Ok(items)
}

/// Fetches feeds over HTTP
pub struct RssFeedClient {
    client: reqwest::Client,
}

impl RssFeedClient {
    pub fn new(timeout_seconds: u64) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(concat!("travel-buddy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FeedError::RequestFailed(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    fn validate_url(url: &str) -> Result<url::Url, FeedError> {
        let parsed = url::Url::parse(url.trim()).map_err(|e| FeedError::InvalidUrl(e.to_string()))?;
        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            scheme => Err(FeedError::InvalidUrl(format!(
                "unsupported scheme '{scheme}'"
            ))),
        }
    }
}

#[async_trait]
impl FeedReader for RssFeedClient {
    async fn fetch_items(&self, url: &str, limit: usize) -> Result<Vec<FeedItem>, FeedError> {
        let url = Self::validate_url(url)?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FeedError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::HttpError {
                status_code: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FeedError::RequestFailed(e.to_string()))?;

        let items = parse_feed(&body, limit)?;
        tracing::debug!(url = %url, count = items.len(), "Fetched feed items");
        Ok(items)
    }
}
