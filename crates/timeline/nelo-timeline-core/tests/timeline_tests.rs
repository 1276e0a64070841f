use approx::assert_relative_eq;
use nelo_timeline_core::{
    value::rotation, Easing, KeyframeBlend, LayerMode, Rotation, TimelineConfig, TimelineContext,
    TimelineError, Vec3,
};
use std::f64::consts::FRAC_PI_2;

fn nearest_ctx() -> TimelineContext {
    TimelineContext::new(TimelineConfig {
        keyframe_blend: KeyframeBlend::Nearest,
        ..TimelineConfig::default()
    })
}

#[test]
fn constant_plus_procedural_layer() {
    let ctx = TimelineContext::default();
    let x = ctx.constant(5.0);
    let y = ctx.procedural(|t| t);

    assert_relative_eq!(x.sample(-1.0), 5.0, epsilon = 1e-4);
    assert_relative_eq!(y.sample(5.0), 5.0, epsilon = 1e-4);

    x.add_timeline(0.5, &y).unwrap();
    assert_relative_eq!(x.sample(1.5), 6.0, epsilon = 1e-4);

    // x now depends on y, so y cannot take x back in.
    let err = y.multiply_timeline(4.0, &x).unwrap_err();
    assert_eq!(
        err,
        TimelineError::CyclicDependency {
            parent: y.id(),
            child: x.id()
        }
    );
    assert_eq!(y.layer_count(), 0);
    assert_eq!(y.dependency_count(), 0);
}

#[test]
fn layer_is_inactive_before_its_start() {
    let ctx = TimelineContext::default();
    let x = ctx.constant(5.0);
    let y = ctx.procedural(|t| t + 100.0);
    x.add_timeline(2.0, &y).unwrap();
    assert_relative_eq!(x.sample(1.999), 5.0);
    assert_relative_eq!(x.sample(2.0), 105.0);
}

#[test]
fn non_positive_time_ignores_keyframes_and_layers() {
    let ctx = TimelineContext::default();
    let x = ctx.constant(1.0);
    x.add_keyframe(-1.0, 50.0, Easing::Linear).unwrap();
    x.add_keyframe(1.0, 10.0, Easing::Linear).unwrap();
    x.add_timeline(-5.0, &ctx.constant(7.0)).unwrap();
    assert_eq!(x.sample(0.0), 1.0);
    assert_eq!(x.sample(-3.0), 1.0);
}

#[test]
fn procedural_layers_apply_at_any_time() {
    let ctx = TimelineContext::default();
    let y = ctx.procedural(|t| t * 3.0);
    y.multiply_timeline(-1.0, &ctx.constant(2.0)).unwrap();
    assert_relative_eq!(y.sample(-0.5), -3.0);
    assert_relative_eq!(y.sample(1.0), 6.0);
}

#[test]
fn keyframes_replace_state_once_passed() {
    let ctx = TimelineContext::default();
    let x = ctx.constant(0.0);
    x.add_keyframe(1.0, 10.0, Easing::Linear)
        .unwrap()
        .add_keyframe(2.0, 20.0, Easing::Linear)
        .unwrap();
    assert_relative_eq!(x.sample(1.5), 15.0);
    assert_relative_eq!(x.sample(2.5), 20.0);
}

#[test]
fn cascade_blends_every_later_keyframe() {
    let ctx = TimelineContext::default();
    let x = ctx.constant(0.0);
    x.add_keyframe(1.0, 10.0, Easing::Linear).unwrap();
    x.add_keyframe(2.0, 20.0, Easing::Linear).unwrap();

    // First blend: 0 -> 10 at progress 0.5 gives 5. The keyframe at 2.0 then
    // blends 5 -> 20 at progress 0.5 / 2.0 = 0.25.
    assert_relative_eq!(x.sample(0.5), 8.75);
}

#[test]
fn nearest_blends_only_the_bracketing_keyframe() {
    let ctx = nearest_ctx();
    let x = ctx.constant(0.0);
    x.add_keyframe(1.0, 10.0, Easing::Linear).unwrap();
    x.add_keyframe(2.0, 20.0, Easing::Linear).unwrap();
    assert_relative_eq!(x.sample(0.5), 5.0);
    assert_relative_eq!(x.sample(1.5), 15.0);
}

#[test]
fn equal_time_keyframes_blend_then_jump() {
    let ctx = TimelineContext::default();
    let x = ctx.constant(0.0);
    x.add_keyframe(1.0, 10.0, Easing::Linear).unwrap();
    x.add_keyframe(1.0, -4.0, Easing::Linear).unwrap();

    // Once past 1.0 the later of the tied keyframes wins.
    assert_relative_eq!(x.sample(1.5), -4.0);
    // At exactly 1.0 both blend fully, in insertion order.
    assert_relative_eq!(x.sample(1.0), -4.0);

    let y = nearest_ctx().constant(0.0);
    y.add_keyframe(1.0, 10.0, Easing::Linear).unwrap();
    y.add_keyframe(1.0, -4.0, Easing::Linear).unwrap();
    assert_relative_eq!(y.sample(1.0), 10.0);
}

#[test]
fn vector_keyframes_blend_component_wise() {
    let ctx = TimelineContext::default();
    let p = ctx.constant(Vec3::zeros());
    p.add_keyframe(2.0, Vec3::new(2.0, 4.0, -2.0), Easing::Linear)
        .unwrap();
    assert_relative_eq!(p.sample(1.0), Vec3::new(1.0, 2.0, -1.0));
}

#[test]
fn discrete_payload_jumps_after_keyframe() {
    let ctx = TimelineContext::default();
    let hidden = ctx.constant(false);
    hidden.add_keyframe(1.0, true, Easing::Linear).unwrap();
    assert!(!hidden.sample(0.5));
    assert!(!hidden.sample(1.0));
    assert!(hidden.sample(1.01));
}

#[test]
fn layers_apply_in_insertion_order() {
    let ctx = TimelineContext::default();
    let add_then_mul = ctx.constant(1.0);
    add_then_mul.add_timeline(0.0, &ctx.constant(2.0)).unwrap();
    add_then_mul
        .multiply_timeline(0.0, &ctx.constant(10.0))
        .unwrap();

    let mul_then_add = ctx.constant(1.0);
    mul_then_add
        .multiply_timeline(0.0, &ctx.constant(10.0))
        .unwrap();
    mul_then_add.add_timeline(0.0, &ctx.constant(2.0)).unwrap();

    assert_relative_eq!(add_then_mul.sample(1.0), 30.0);
    assert_relative_eq!(mul_then_add.sample(1.0), 12.0);
    assert_eq!(
        add_then_mul
            .layers()
            .iter()
            .map(|l| l.mode)
            .collect::<Vec<_>>(),
        vec![LayerMode::Additive, LayerMode::Multiplicative]
    );
}

#[test]
fn multiplicative_layer_puts_delta_on_the_left() {
    let ctx = TimelineContext::default();
    let base = rotation(Vec3::x(), FRAC_PI_2);
    let delta = rotation(Vec3::z(), FRAC_PI_2);

    let r = ctx.constant(base);
    r.multiply_timeline(0.0, &ctx.constant(delta)).unwrap();

    let sampled: Rotation = r.sample(1.0);
    assert_relative_eq!(sampled, delta * base, epsilon = 1e-12);
    assert!((sampled.angle_to(&(base * delta))) > 1e-3);
}

#[test]
fn rotation_keyframes_slerp() {
    let ctx = TimelineContext::default();
    let r = ctx.constant(Rotation::identity());
    r.add_keyframe(1.0, rotation(Vec3::y(), FRAC_PI_2), Easing::Linear)
        .unwrap();
    assert_relative_eq!(r.sample(0.5).angle(), FRAC_PI_2 / 2.0, epsilon = 1e-9);
}

#[test]
fn cycle_guard_covers_transitive_dependencies() {
    let ctx = TimelineContext::default();
    let a = ctx.constant(1.0);
    let b = ctx.constant(1.0);
    let c = ctx.constant(1.0);

    b.add_timeline(0.0, &a).unwrap();
    c.multiply_timeline(0.0, &b).unwrap();
    assert!(c.depends_on(&a));
    assert!(c.depends_on(&b));

    let before = a.dependency_count();
    assert!(matches!(
        a.add_timeline(1.0, &c),
        Err(TimelineError::CyclicDependency { .. })
    ));
    assert!(matches!(
        a.multiply_timeline(1.0, &c),
        Err(TimelineError::CyclicDependency { .. })
    ));
    assert_eq!(a.dependency_count(), before);
    assert_eq!(a.layer_count(), 0);
}

#[test]
fn shared_child_in_two_parents_is_allowed() {
    let ctx = TimelineContext::default();
    let child = ctx.procedural(|t| t);
    let left = ctx.constant(1.0);
    let right = ctx.constant(2.0);
    left.add_timeline(0.0, &child).unwrap();
    right.add_timeline(0.0, &child).unwrap();

    // Diamond: both parents under one root.
    let root = ctx.constant(0.0);
    root.add_timeline(0.0, &left).unwrap();
    root.add_timeline(0.0, &right).unwrap();
    assert_relative_eq!(root.sample(1.0), 1.0 + 1.0 + 2.0 + 1.0);
    assert_eq!(root.dependency_count(), 3);
}

#[test]
fn child_edits_show_through_the_parent() {
    let ctx = TimelineContext::default();
    let parent = ctx.constant(0.0);
    let child = ctx.constant(0.0);
    parent.add_timeline(0.0, &child).unwrap();
    child.add_keyframe(1.0, 4.0, Easing::Linear).unwrap();
    assert_relative_eq!(parent.sample(0.5), 2.0);
}

#[test]
fn default_length_rules() {
    let ctx = TimelineContext::default();
    let x = ctx.constant(0.0);
    assert_eq!(x.default_length(), 1.0);
    assert_eq!(x.length(), 1.0);

    x.add_keyframe(2.5, 1.0, Easing::Linear).unwrap();
    assert_eq!(x.default_length(), 2.5);
    assert_eq!(x.length(), 2.5);

    // A procedural child reports the fallback length.
    let y = ctx.procedural(|t| t);
    x.add_timeline(2.0, &y).unwrap();
    assert_eq!(x.length(), 3.0);

    let z = ctx.constant(0.0);
    z.set_length(10.0);
    x.add_timeline(-1.0, &z).unwrap();
    assert_eq!(x.length(), 9.0);
}

#[test]
fn pinned_length_survives_edits() {
    let ctx = TimelineContext::default();
    let x = ctx.constant(0.0);
    x.set_length(4.0);
    x.add_keyframe(7.0, 1.0, Easing::Linear).unwrap();
    x.add_timeline(8.0, &ctx.constant(1.0)).unwrap();
    assert_eq!(x.length(), 4.0);
    assert!(x.is_length_pinned());
    assert_eq!(x.default_length(), 9.0);

    x.set_length(0.0);
    assert!(!x.is_length_pinned());
    assert_eq!(x.length(), 9.0);

    x.set_length(2.0);
    x.set_length(-3.0);
    assert_eq!(x.length(), 9.0);

    x.set_length(2.0).reset_length();
    assert_eq!(x.length(), 9.0);
}

#[test]
fn parent_length_is_cached_until_recomputed() {
    let ctx = TimelineContext::default();
    let parent = ctx.constant(0.0);
    let child = ctx.constant(0.0);
    parent.add_timeline(1.0, &child).unwrap();
    assert_eq!(parent.length(), 2.0);

    child.set_length(5.0);
    assert_eq!(parent.length(), 2.0);
    assert_eq!(parent.default_length(), 6.0);
    parent.reset_length();
    assert_eq!(parent.length(), 6.0);
}

#[test]
fn fallback_length_is_configurable() {
    let ctx = TimelineContext::new(TimelineConfig {
        fallback_length: 3.0,
        ..TimelineConfig::default()
    });
    let x = ctx.constant(0.0);
    assert_eq!(x.length(), 3.0);
    assert_eq!(x.default_length(), 3.0);
}

#[test]
fn finalized_graph_samples_from_many_threads() {
    let ctx = TimelineContext::default();
    let x = ctx.constant(1.0);
    x.add_keyframe(1.0, 3.0, Easing::Linear).unwrap();
    x.add_timeline(0.0, &ctx.procedural(|t| t * 10.0)).unwrap();

    std::thread::scope(|s| {
        for i in 0..4u32 {
            let x = &x;
            s.spawn(move || {
                let t = 0.25 * f64::from(i + 1);
                let expected = (1.0 + 2.0 * t) + t * 10.0;
                assert_relative_eq!(x.sample(t), expected, epsilon = 1e-12);
            });
        }
    });
}
