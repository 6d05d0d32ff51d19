use super::record::GraspRecord;

/// Dof-vector indices of each chain's intermediate joint, finger order.
const INTERMEDIATE_DOFS: [usize; 5] = [1, 4, 7, 10, 14];

/// Dof-vector indices of each chain's distal joint, finger order.
const DISTAL_DOFS: [usize; 5] = [2, 5, 8, 11, 15];

/// Per-chain rest-angle offsets added to the distal angle, degrees.
const DISTAL_OFFSETS_DEG: [f64; 5] = [10.5, 6.5, 8.0, 2.2, 0.0];

/// Links whose contact proves the chain is actually touching the object.
const DEPENDENT_LINKS: [&[&str]; 5] = [
    &["index_link1", "index_link2"],
    &["mid_link1", "mid_link2"],
    &["ring_link1", "ring_link2"],
    &["pinky_link1", "pinky_link2"],
    &["thumb_link2"],
];

/// Distal angle (plus offset) beyond which a non-contacting chain counts as
/// squeezed, degrees.
const SQUEEZE_THRESHOLD_DEG: f64 = 94.0;

/// Finds records whose fingers are closed past the squeeze threshold
/// without touching the object.
///
/// Returns `(record index, repair joint indices)` pairs; the joint list
/// holds the flagged chains' intermediate indices followed by their distal
/// indices. Records with no flagged chain are omitted.
pub fn squeezed(records: &[GraspRecord]) -> Vec<(usize, Vec<usize>)> {
    let mut flagged = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let mut chains = [false; 5];
        for c in 0..5 {
            let Some(&distal) = record.dofs.get(DISTAL_DOFS[c]) else {
                continue;
            };
            let closed = distal.to_degrees() + DISTAL_OFFSETS_DEG[c] > SQUEEZE_THRESHOLD_DEG;
            let touching = DEPENDENT_LINKS[c]
                .iter()
                .any(|l| record.links_in_contact.iter().any(|link| link == l));
            chains[c] = closed && !touching;
        }

        let mut joints: Vec<usize> = (0..5).filter(|&c| chains[c]).map(|c| INTERMEDIATE_DOFS[c]).collect();
        joints.extend((0..5).filter(|&c| chains[c]).map(|c| DISTAL_DOFS[c]));

        if !joints.is_empty() {
            flagged.push((index, joints));
        }
    }

    flagged
}
