use crate::core::kinematics::KinematicModel;
use phf::phf_map;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed table mapping the engine's internal chain tokens to finger names.
static CHAIN_FINGER: phf::Map<&'static str, &'static str> = phf_map! {
    "chain0" => "index",
    "chain1" => "mid",
    "chain2" => "ring",
    "chain3" => "pinky",
    "chain4" => "thumb",
};

/// Name of the hand's root body in engine contact reports.
pub const ROOT_BODY: &str = "Base";

/// Link identifier for contacts against the root body.
pub const PALM_LINK: &str = "palm";

/// Weight applied to the composite quality when the palm touches the object.
const PALM_QUALITY_FACTOR: f64 = 3.0;

/// One contact point between a hand link and the target body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub link: String,
    pub pose: [f64; 7],
}

/// One mined grasp: the unit of output.
///
/// `quality` is always derived via [`composite_quality`], never taken from
/// the engine. `target_trans`/`target_pose` are present only once the grasp
/// has been retargeted. Serialized field names follow the record-collection
/// file format (`link_in_contact`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraspRecord {
    /// Root pose: position xyz followed by orientation quaternion xyzw.
    pub pose: [f64; 7],
    /// Source-rig joint angles, radians.
    pub dofs: Vec<f64>,
    pub contacts: Vec<Contact>,
    pub epsilon: f64,
    pub volume: f64,
    #[serde(rename = "link_in_contact")]
    pub links_in_contact: Vec<String>,
    pub quality: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub target_trans: Option<[f64; 3]>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub target_pose: Option<Vec<f64>>,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized contact body name '{0}'")]
pub struct LinkNameError(pub String);

/// Resolves an engine body name to a link identifier.
///
/// The root body maps to `"palm"`; any other body is expected to be named
/// `<robot>_<chainToken>_<linkToken>` and renders as
/// `"<finger>_<linkToken>"` via the fixed chain table.
pub fn resolve_link(body: &str) -> Result<String, LinkNameError> {
    if body == ROOT_BODY {
        return Ok(PALM_LINK.to_string());
    }
    let mut parts = body.split('_');
    let (_robot, chain, link) = (parts.next(), parts.next(), parts.next());
    match (chain, link) {
        (Some(chain), Some(link)) => CHAIN_FINGER
            .get(chain)
            .map(|finger| format!("{finger}_{link}"))
            .ok_or_else(|| LinkNameError(body.to_string())),
        _ => Err(LinkNameError(body.to_string())),
    }
}

/// Composite grasp quality from the engine's raw scalars and the contact
/// geometry: palm engagement is rewarded heavily, and contact breadth
/// scales the score with the square root of the distinct link count.
pub fn composite_quality(epsilon: f64, volume: f64, links_in_contact: &[String]) -> f64 {
    let palm = if links_in_contact.iter().any(|l| l == PALM_LINK) {
        PALM_QUALITY_FACTOR
    } else {
        1.0
    };
    epsilon.hypot(volume) * palm * (links_in_contact.len() as f64).sqrt()
}

impl GraspRecord {
    /// Fills the target-parameterization fields from the record's own root
    /// pose and joint angles.
    pub fn retarget(&mut self, model: &KinematicModel) {
        let xyz = [self.pose[0], self.pose[1], self.pose[2]];
        let quat = [self.pose[3], self.pose[4], self.pose[5], self.pose[6]];
        let (trans, pose) = model.convert(&xyz, &quat, &self.dofs);
        self.target_trans = Some([trans.x, trans.y, trans.z]);
        self.target_pose = Some(pose);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn root_body_resolves_to_palm() {
        assert_eq!(resolve_link("Base").unwrap(), "palm");
    }

    #[test]
    fn chain_bodies_resolve_via_the_finger_table() {
        assert_eq!(resolve_link("ManoHand_chain0_link2").unwrap(), "index_link2");
        assert_eq!(resolve_link("ManoHand_chain4_link1").unwrap(), "thumb_link1");
    }

    #[test]
    fn unknown_chain_tokens_are_rejected() {
        assert!(resolve_link("ManoHand_chain9_link1").is_err());
        assert!(resolve_link("ManoHand").is_err());
    }

    #[test]
    fn palm_contact_raises_quality_for_equal_raw_scalars() {
        let with_palm = composite_quality(0.2, 0.1, &links(&["palm", "index_link1"]));
        let without_palm = composite_quality(0.2, 0.1, &links(&["mid_link1", "index_link1"]));
        assert!(with_palm > without_palm);
    }

    #[test]
    fn more_contact_links_raise_quality_for_equal_raw_scalars() {
        let narrow = composite_quality(0.2, 0.1, &links(&["index_link1"]));
        let broad = composite_quality(0.2, 0.1, &links(&["index_link1", "mid_link1"]));
        assert!(broad > narrow);
    }

    #[test]
    fn quality_combines_factors_exactly() {
        let q = composite_quality(3.0, 4.0, &links(&["palm", "index_link1", "mid_link1", "ring_link1"]));
        assert!((q - 5.0 * 3.0 * 2.0).abs() < 1e-12);
    }

    #[test]
    fn serialized_records_use_the_collection_file_field_names() {
        let record = GraspRecord {
            pose: [0.0; 7],
            dofs: vec![0.0; 20],
            contacts: vec![],
            epsilon: 0.1,
            volume: 0.2,
            links_in_contact: links(&["palm"]),
            quality: 0.3,
            target_trans: None,
            target_pose: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("link_in_contact").is_some());
        assert!(json.get("links_in_contact").is_none());
        // Retarget fields are absent until filled.
        assert!(json.get("target_trans").is_none());
        assert!(json.get("target_pose").is_none());
    }
}
