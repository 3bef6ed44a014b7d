mod host;

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::script::AssembledScript;

pub use host::{Host, ResourceLink, SaveHost, StagingHost};

#[cfg(test)]
pub use host::memory::MemoryHost;

/// How the assembled script was handed to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Delivery {
    Link(ResourceLink),
    Saved { path: PathBuf },
}

/// Binds the current script generation to the download affordance.
/// At most one link is bound at a time; it is revoked before a new one is
/// issued, when the affordance is withdrawn, and when the adapter is dropped.
pub struct DeliveryAdapter<H: Host> {
    host: H,
    bound: Option<ResourceLink>,
}

impl<H: Host> DeliveryAdapter<H> {
    pub fn new(host: H) -> Self {
        DeliveryAdapter { host, bound: None }
    }

    /// Replace whatever was bound with `script`. Prefers a link when the host
    /// supports one and falls back to a direct save otherwise.
    pub fn deliver(&mut self, script: &AssembledScript) -> Result<Delivery> {
        self.release();

        if self.host.supports_links() {
            match self.host.create_link(script) {
                Ok(link) => {
                    info!(url = %link.url, bytes = script.bytes.len(), "bound download link");
                    self.bound = Some(link.clone());
                    return Ok(Delivery::Link(link));
                }
                Err(e) => warn!(error = %e, "could not stage download link, saving instead"),
            }
        } else {
            debug!("host has no link support, saving directly");
        }

        let path = self.host.save_as(script)?;
        info!(path = %path.display(), bytes = script.bytes.len(), "saved script");
        Ok(Delivery::Saved { path })
    }

    /// Hide the download affordance and release any bound link.
    pub fn withdraw(&mut self) {
        self.release();
    }

    #[cfg(test)]
    pub fn bound_link(&self) -> Option<&ResourceLink> {
        self.bound.as_ref()
    }

    #[cfg(test)]
    pub fn host(&self) -> &H {
        &self.host
    }

    fn release(&mut self) {
        if let Some(link) = self.bound.take() {
            match self.host.revoke_link(&link) {
                Ok(()) => debug!(url = %link.url, "released download link"),
                Err(e) => warn!(url = %link.url, error = %e, "failed to release download link"),
            }
        }
    }
}

impl<H: Host> Drop for DeliveryAdapter<H> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{SCRIPT_FILENAME, SCRIPT_MEDIA_TYPE};

    fn make_script(text: &str) -> AssembledScript {
        AssembledScript {
            bytes: text.as_bytes().to_vec(),
            fragment_count: 2,
            media_type: SCRIPT_MEDIA_TYPE,
            suggested_filename: SCRIPT_FILENAME,
        }
    }

    #[test]
    fn test_prefers_link_when_supported() {
        let mut adapter = DeliveryAdapter::new(MemoryHost::with_links());
        let delivery = adapter.deliver(&make_script("a\r\n")).unwrap();
        let Delivery::Link(link) = delivery else {
            panic!("expected a link");
        };
        assert_eq!(link.suggested_filename, SCRIPT_FILENAME);
        assert_eq!(adapter.host().resolve(&link.url), Some(&b"a\r\n"[..]));
        assert!(adapter.host().saved.is_empty());
    }

    #[test]
    fn test_falls_back_to_save_without_link_support() {
        let mut adapter = DeliveryAdapter::new(MemoryHost::default());
        let delivery = adapter.deliver(&make_script("a\r\n")).unwrap();
        assert_eq!(
            delivery,
            Delivery::Saved {
                path: PathBuf::from(SCRIPT_FILENAME)
            }
        );
        assert!(adapter.bound_link().is_none());
        assert_eq!(adapter.host().saved.len(), 1);
        assert_eq!(adapter.host().saved[0].0, SCRIPT_FILENAME);
    }

    #[test]
    fn test_falls_back_when_link_creation_fails() {
        let host = MemoryHost {
            fail_links: true,
            ..MemoryHost::with_links()
        };
        let mut adapter = DeliveryAdapter::new(host);
        let delivery = adapter.deliver(&make_script("a\r\n")).unwrap();
        assert!(matches!(delivery, Delivery::Saved { .. }));
        assert_eq!(adapter.host().saved.len(), 1);
    }

    #[test]
    fn test_redelivery_revokes_previous_link() {
        let mut adapter = DeliveryAdapter::new(MemoryHost::with_links());
        let Delivery::Link(first) = adapter.deliver(&make_script("one")).unwrap() else {
            panic!("expected a link");
        };
        let Delivery::Link(second) = adapter.deliver(&make_script("two")).unwrap() else {
            panic!("expected a link");
        };
        assert!(adapter.host().resolve(&first.url).is_none());
        assert_eq!(adapter.host().resolve(&second.url), Some(&b"two"[..]));
        assert_eq!(adapter.host().resources.len(), 1);
    }

    #[test]
    fn test_withdraw_releases_link() {
        let mut adapter = DeliveryAdapter::new(MemoryHost::with_links());
        let Delivery::Link(link) = adapter.deliver(&make_script("one")).unwrap() else {
            panic!("expected a link");
        };
        adapter.withdraw();
        assert!(adapter.bound_link().is_none());
        assert!(adapter.host().resolve(&link.url).is_none());
    }

    #[test]
    fn test_drop_releases_staged_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = {
            let mut adapter =
                DeliveryAdapter::new(StagingHost::new(dir.path().join("s"), dir.path()));
            let Delivery::Link(link) = adapter.deliver(&make_script("x")).unwrap() else {
                panic!("expected a link");
            };
            assert!(link.path.exists());
            link.path
        };
        assert!(!path.exists());
    }
}
