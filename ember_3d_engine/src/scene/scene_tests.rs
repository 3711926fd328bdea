/// Tests for Scene
///
/// These tests validate the entity lifecycle via SlotMap keys, iteration,
/// and the skip-on-failure draw policy.

use super::*;
use std::sync::Arc;
use glam::Vec3;
use crate::camera::CameraDesc;
use crate::graphics_device::mock_graphics_device::{MockCommandList, MockGraphicsDevice};
use crate::graphics_device::{ConstantBufferReflection, ParamType, ShaderReflection, ShaderStage};
use crate::resource::{Material, MaterialDesc};
use crate::test_utils::{create_shader, mock_device, pixel_reflection, quad_mesh, red_material, PS_LABEL};

// ============================================================================
// Helper Functions
// ============================================================================

fn create_test_camera() -> Camera {
    Camera::new(1.0, Vec3::new(0.0, 0.0, -5.0), CameraDesc::default())
}

fn create_test_entity() -> Entity {
    let (_mock, device) = mock_device();
    Entity::new(quad_mesh(&device), red_material(&device))
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_scene_new_is_empty() {
    let scene = Scene::new();
    assert_eq!(scene.entity_count(), 0);
    assert_eq!(scene.entities().count(), 0);
}

#[test]
fn test_add_and_get_entity() {
    let mut scene = Scene::new();
    let key = scene.add_entity(create_test_entity());

    assert_eq!(scene.entity_count(), 1);
    assert!(scene.entity(key).is_some());

    scene.entity_mut(key).unwrap().transform_mut().set_position(1.0, 2.0, 3.0);
    assert_eq!(scene.entity(key).unwrap().transform().position(), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_remove_entity_keeps_other_keys_valid() {
    let mut scene = Scene::new();
    let first = scene.add_entity(create_test_entity());
    let second = scene.add_entity(create_test_entity());

    assert!(scene.remove_entity(first).is_some());
    assert!(scene.remove_entity(first).is_none());
    assert!(scene.entity(first).is_none());
    assert!(scene.entity(second).is_some());
    assert_eq!(scene.entity_count(), 1);
}

#[test]
fn test_removed_entity_releases_shared_mesh() {
    let (_mock, device) = mock_device();
    let mesh = quad_mesh(&device);
    let mut scene = Scene::new();
    let key = scene.add_entity(Entity::new(mesh.clone(), red_material(&device)));

    assert_eq!(Arc::strong_count(&mesh), 2);
    scene.remove_entity(key);
    assert_eq!(Arc::strong_count(&mesh), 1);
}

#[test]
fn test_clear() {
    let mut scene = Scene::new();
    let key = scene.add_entity(create_test_entity());
    scene.add_entity(create_test_entity());

    scene.clear();

    assert_eq!(scene.entity_count(), 0);
    assert!(scene.entity(key).is_none());
}

#[test]
fn test_entities_iterates_all_keys() {
    let mut scene = Scene::new();
    let a = scene.add_entity(create_test_entity());
    let b = scene.add_entity(create_test_entity());

    let keys: Vec<EntityKey> = scene.entities().map(|(key, _)| key).collect();
    assert_eq!(keys.len(), 2);
    assert!(keys.contains(&a));
    assert!(keys.contains(&b));
}

// ============================================================================
// Draw
// ============================================================================

#[test]
fn test_draw_empty_scene() {
    let mut scene = Scene::new();
    let mut cmd = MockCommandList::new();

    let stats = scene.draw(&mut cmd, &create_test_camera());

    assert_eq!(stats, DrawStats { drawn: 0, skipped: 0 });
    assert!(cmd.commands.is_empty());
}

#[test]
fn test_draw_all_entities() {
    let mut scene = Scene::new();
    scene.add_entity(create_test_entity());
    scene.add_entity(create_test_entity());
    scene.add_entity(create_test_entity());

    let mut cmd = MockCommandList::new();
    let stats = scene.draw(&mut cmd, &create_test_camera());

    assert_eq!(stats, DrawStats { drawn: 3, skipped: 0 });
    assert_eq!(cmd.draw_counts(), vec![6, 6, 6]);
}

#[test]
fn test_failing_entity_is_skipped() {
    let no_world = ShaderReflection::new(vec![ConstantBufferReflection::packed("ExternalData", 0, &[
        ("view", ParamType::Mat4),
        ("projection", ParamType::Mat4),
    ])]);
    let (_mock, device) = MockGraphicsDevice::new()
        .with_reflection("NoWorld.cso", no_world)
        .with_reflection(PS_LABEL, pixel_reflection())
        .into_shared();
    let broken_material = Arc::new(Material::new(MaterialDesc {
        tint: glam::Vec4::ONE,
        roughness: 0.5,
        vertex_shader: create_shader(&device, "NoWorld.cso", ShaderStage::Vertex),
        pixel_shader: create_shader(&device, PS_LABEL, ShaderStage::Pixel),
        params: Vec::new(),
    }).unwrap());

    let mut scene = Scene::new();
    scene.add_entity(create_test_entity());
    scene.add_entity(Entity::new(quad_mesh(&device), broken_material));
    scene.add_entity(create_test_entity());

    let mut cmd = MockCommandList::new();
    let stats = scene.draw(&mut cmd, &create_test_camera());

    assert_eq!(stats, DrawStats { drawn: 2, skipped: 1 });
    assert_eq!(cmd.draw_counts(), vec![6, 6]);
}
