mod export;
mod frontmatter;
mod import;
mod roundtrip;

use blockdown::{LinkImage, LinkMeta, LinkMetadataProvider};

/// A deterministic provider standing in for the network fetcher.
pub struct StubLinks;

impl LinkMetadataProvider for StubLinks {
    fn fetch(&self, url: &str) -> LinkMeta {
        LinkMeta {
            title: "Example Domain".to_string(),
            description: format!("metadata for {url}"),
            image: LinkImage {
                url: "https://example.com/og.png".to_string(),
            },
        }
    }
}
