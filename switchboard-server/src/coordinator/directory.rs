use crate::transport::PeerLink;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use switchboard_core::ConnectionId;

/// Live mapping from connection id to the outbound link of that connection.
/// Owned by the coordinator task and never shared.
#[derive(Default)]
pub(crate) struct Directory {
    links: HashMap<ConnectionId, Box<dyn PeerLink>>,
}

impl Directory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers a link under a freshly generated id that no live entry uses.
    pub(crate) fn insert(&mut self, link: Box<dyn PeerLink>) -> ConnectionId {
        loop {
            let id = ConnectionId::new();
            if let Entry::Vacant(slot) = self.links.entry(id) {
                slot.insert(link);
                return id;
            }
        }
    }

    /// Returns `false` when the id was already gone.
    pub(crate) fn remove(&mut self, id: &ConnectionId) -> bool {
        self.links.remove(id).is_some()
    }

    pub(crate) fn get(&self, id: &ConnectionId) -> Option<&dyn PeerLink> {
        self.links.get(id).map(|link| link.as_ref())
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&ConnectionId, &dyn PeerLink)> {
        self.links.iter().map(|(id, link)| (id, link.as_ref()))
    }

    pub(crate) fn len(&self) -> usize {
        self.links.len()
    }
}
