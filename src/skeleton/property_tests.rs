//! 骨骼核心属性测试
//!
//! 使用proptest验证分类、拾取、约束和重置在任意输入下的不变量

use crate::classify::{BoneClassifier, GroupName};
use crate::constraints::RotationConstraintManager;
use crate::picking::{BonePicker, PickCandidate, PickQuery, PickTier};
use crate::skeleton::{Axis, BoneNode, BoneRegistry, EulerRotation, NodeHierarchy, NodeId};
use glam::Vec3;
use proptest::prelude::*;

fn finite_f32() -> impl Strategy<Value = f32> {
    (-1000.0f32..1000.0).prop_filter("must be finite", |&x| x.is_finite())
}

fn valid_vec3() -> impl Strategy<Value = Vec3> {
    (finite_f32(), finite_f32(), finite_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn axis() -> impl Strategy<Value = Axis> {
    prop::sample::select(Axis::ALL.to_vec())
}

fn bone_name() -> impl Strategy<Value = String> {
    let fragments = vec![
        "Left", "Right", "Hip", "Arm", "Hand", "Spine", "Head", "Toe", "Leg", "l_", "_r", "Bone",
        "Twist", "mixamorig:",
    ];
    prop::collection::vec(prop::sample::select(fragments), 1..4).prop_map(|parts| parts.concat())
}

/// 任意骨骼列表：父引用可以悬空、指向自身或成环
fn skeleton() -> impl Strategy<Value = Vec<BoneNode>> {
    prop::collection::vec((bone_name(), prop::option::of(0u64..40), finite_f32()), 0..24).prop_map(
        |entries| {
            let n = entries.len() as u64;
            entries
                .into_iter()
                .enumerate()
                .map(|(i, (name, parent, x))| {
                    let mut bone = BoneNode::new(NodeId::new(i as u64 + 1), name)
                        .with_rotation(EulerRotation::new(x / 1000.0, 0.0, 0.0))
                        .with_translation(Vec3::new(0.0, 0.1, 0.0));
                    if let Some(p) = parent {
                        // 超出范围的父ID保持悬空
                        let parent = if p < n * 2 { p % n.max(1) + 1 } else { p };
                        bone.parent = Some(NodeId::new(parent));
                    }
                    bone
                })
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn classification_is_deterministic_and_total(nodes in skeleton()) {
        let classifier = BoneClassifier::default();
        let first = classifier.classify(&nodes);
        let second = classifier.classify(&nodes);
        prop_assert_eq!(&first, &second);

        // 每根骨骼恰好出现在一个分组中
        prop_assert_eq!(first.total(), nodes.len());
        for node in &nodes {
            let count = GroupName::ALL
                .iter()
                .filter(|&&g| first.get(g).contains(&node.id))
                .count();
            prop_assert_eq!(count, 1);
        }
    }

    #[test]
    fn parentless_bones_are_always_root(nodes in skeleton()) {
        let groups = BoneClassifier::default().classify(&nodes);
        for node in nodes.iter().filter(|n| n.parent.is_none()) {
            prop_assert_eq!(groups.group_of(node.id), Some(GroupName::Root));
        }
    }

    #[test]
    fn ancestor_walks_terminate(nodes in skeleton()) {
        let hierarchy = NodeHierarchy::from_pairs(nodes.iter().map(|n| (n.id, n.parent)));
        for node in &nodes {
            prop_assert!(hierarchy.ancestors(node.id).count() <= hierarchy.len());
            prop_assert!(hierarchy.descendants(node.id).len() < hierarchy.len().max(1));
        }
        prop_assert!(hierarchy.walk_depth_first().len() <= hierarchy.len());
    }

    #[test]
    fn clamped_rotation_stays_in_range(
        nodes in skeleton(),
        axis in axis(),
        bound_a in -4.0f32..4.0,
        bound_b in -4.0f32..4.0,
        value in finite_f32()
    ) {
        prop_assume!(!nodes.is_empty());
        prop_assume!(bound_a != bound_b);
        let (min, max) = if bound_a < bound_b { (bound_a, bound_b) } else { (bound_b, bound_a) };

        let mut registry = BoneRegistry::default();
        registry.load(nodes.clone());
        let mut manager = RotationConstraintManager::default();
        let id = nodes[0].id;

        manager.set_constraint(&mut registry, id, axis, min, max).unwrap();
        let written = manager.set_rotation(&mut registry, id, axis, value).unwrap();
        prop_assert!(written >= min && written <= max);
        prop_assert_eq!(registry.find_by_id(id).unwrap().local_rotation.get(axis), written);
    }

    #[test]
    fn reset_restores_snapshot(
        nodes in skeleton(),
        edits in prop::collection::vec((0usize..24, axis(), finite_f32()), 0..16)
    ) {
        let mut registry = BoneRegistry::default();
        registry.load(nodes.clone());
        let mut manager = RotationConstraintManager::default();

        for (index, axis, value) in edits {
            if let Some(node) = nodes.get(index) {
                manager.set_rotation(&mut registry, node.id, axis, value).unwrap();
            }
        }

        registry.reset_all();
        let once: Vec<EulerRotation> = registry.bones().iter().map(|b| b.local_rotation).collect();
        registry.reset_all();
        let twice: Vec<EulerRotation> = registry.bones().iter().map(|b| b.local_rotation).collect();
        prop_assert_eq!(&once, &twice);

        for bone in registry.bones() {
            prop_assert_eq!(Some(bone.local_rotation), registry.original_rotation(bone.id));
        }
    }

    #[test]
    fn picker_always_answers_with_a_candidate(
        positions in prop::collection::vec(valid_vec3(), 0..16),
        hit in valid_vec3(),
        camera in valid_vec3(),
        picked in prop::option::of(0u64..32)
    ) {
        let candidates: Vec<PickCandidate> = positions
            .iter()
            .enumerate()
            .map(|(i, &p)| PickCandidate::new(NodeId::new(i as u64), p))
            .collect();
        let mut query = PickQuery::at(hit).with_camera(camera, Vec3::NEG_Z);
        if let Some(p) = picked {
            query = query.with_picked(NodeId::new(p));
        }

        match BonePicker::resolve(&query, &candidates) {
            None => prop_assert!(candidates.is_empty()),
            Some(resolution) => {
                prop_assert!(candidates.iter().any(|c| c.id == resolution.bone));
                let direct = picked.is_some_and(|p| (p as usize) < candidates.len());
                prop_assert_eq!(resolution.tier == PickTier::DirectHit, direct);
            }
        }
    }
}
