use std::collections::BTreeMap;

use crate::shared::encoding::Encoding;

/// One inferred person: the observations assigned to a cluster, plus the
/// member chosen as the match reference during export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonCluster {
    pub id: u32,
    /// Observation indices in encoding-scan order.
    pub members: Vec<usize>,
    /// The member observation nearest the cluster centroid.
    pub representative: usize,
}

impl PersonCluster {
    /// Groups clustering labels into person-clusters.
    ///
    /// `labels` and `encodings` correspond row-for-row. Noise labels are
    /// dropped entirely. The representative is the member whose encoding is
    /// nearest the cluster centroid, ties broken by lowest index.
    pub fn from_labels(labels: &[i32], encodings: &[&Encoding]) -> Vec<PersonCluster> {
        debug_assert_eq!(labels.len(), encodings.len());

        let mut by_label: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
        for (idx, &label) in labels.iter().enumerate() {
            if label >= 0 {
                by_label.entry(label).or_default().push(idx);
            }
        }

        by_label
            .into_iter()
            .map(|(label, members)| {
                let representative = nearest_to_centroid(&members, encodings);
                PersonCluster {
                    id: label as u32,
                    members,
                    representative,
                }
            })
            .collect()
    }
}

fn nearest_to_centroid(members: &[usize], encodings: &[&Encoding]) -> usize {
    let member_encodings: Vec<&Encoding> = members.iter().map(|&i| encodings[i]).collect();
    let centroid = Encoding::centroid(&member_encodings).expect("clusters are never empty");

    let mut best = members[0];
    let mut best_dist = f64::INFINITY;
    for &idx in members {
        let d = encodings[idx].euclidean_distance(&centroid);
        if d < best_dist {
            best = idx;
            best_dist = d;
        }
    }
    best
}
