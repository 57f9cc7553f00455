//! Records that flow through the working set and the emitted cluster stream.

use crate::model::PHash;

/// One image as tracked by the clusterizer's working set.
///
/// `image_id == 0` is reserved as "absent" and never produced by a real
/// store load. `processed` is monotonic: once set it is never cleared, only
/// dropped by the [`crate::cluster::compactor`].
#[derive(Clone, Debug)]
pub struct ImageRecord {
    pub image_id: u32,
    pub fingerprint: PHash,
    pub processed: bool,
}

impl ImageRecord {
    pub fn new(image_id: u32, fingerprint: PHash) -> Self {
        Self {
            image_id,
            fingerprint,
            processed: false,
        }
    }

    /// Whether this record can ever become a seed or a member: it has a
    /// real id and its fingerprint isn't the "undecodable" sentinel.
    pub fn is_eligible(&self) -> bool {
        self.image_id != 0 && !self.fingerprint.is_absent_sentinel()
    }
}

/// A member produced by a worker scan, accumulated onto the current cluster.
#[derive(Clone, Debug)]
pub struct ClusterEntry {
    pub fingerprint: PHash,
    pub image_id: u32,
}

/// One emitted cluster: a seed plus every member absorbed within threshold.
#[derive(Clone, Debug)]
pub struct Cluster {
    pub cluster_id: u64,
    pub entries: Vec<ClusterEntry>,
}

impl Cluster {
    /// The seed is always the first entry pushed when the cluster opened.
    pub fn seed(&self) -> &ClusterEntry {
        &self.entries[0]
    }
}
