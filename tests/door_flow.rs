//! End-to-end interaction flows driven through the test harness.

use glam::Vec3;
use latchkey_audio::ClipId;
use latchkey_core::KeyId;
use latchkey_interact::{DoorConfig, DoorKind, DoorSounds, PickupConfig};
use latchkey_testkit::Harness;

fn sounds() -> DoorSounds {
    DoorSounds {
        open: ClipId::new("door/open"),
        close: ClipId::new("door/close"),
        push: ClipId::new("door/push"),
        lock: ClipId::new("door/lock"),
        unlock: ClipId::new("door/unlock"),
        creaks: vec![ClipId::new("door/creak_1"), ClipId::new("door/creak_2")],
    }
}

fn door_config(kind: DoorKind, locked: bool) -> DoorConfig {
    DoorConfig {
        kind,
        locked,
        remove_key_on_use: false,
        speed: 1.0,
        rotation_degrees: 90.0,
        forward_threshold: 0.0,
        slide_direction: Vec3::NEG_Z,
        slide_distance: 1.2,
        key: KeyId(0),
        position: Vec3::new(4.0, 0.0, 0.0),
        yaw_degrees: 0.0,
        sounds: sounds(),
    }
}

fn clip_names(harness: &Harness) -> Vec<String> {
    harness
        .audio
        .events()
        .iter()
        .map(|event| event.clip.0.clone())
        .collect()
}

/// The full demo loop: push a locked door, fetch the key, unlock, open,
/// then close it again, checking the audible story along the way.
#[test]
fn locked_door_full_cycle() {
    let mut harness = Harness::new(1, 42);
    let actor = Vec3::new(2.0, 0.0, 0.0); // in front of the hinge
    let door = harness.spawn_door(1, &door_config(DoorKind::Rotating, true));
    let pickup = harness.spawn_pickup(
        2,
        &PickupConfig {
            key: KeyId(0),
            position: Vec3::new(1.0, 0.5, 1.0),
        },
    );

    // Locked: the door only rattles.
    harness.interact(door, actor);
    assert_eq!(harness.audio.count(&ClipId::new("door/push")), 1);

    // Grab the key; the pickup disappears at the end of the tick.
    harness.interact(pickup, actor);
    harness.step(1);
    assert!(harness.inventory.contains(KeyId(0)));
    assert!(!harness.world.contains(pickup));

    // Unlock is not throttled by the push cooldown.
    harness.alternate(door, actor);
    assert_eq!(harness.audio.count(&ClipId::new("door/unlock")), 1);

    // The push armed a one-second cooldown; wait it out before opening.
    harness.step_seconds(1.0);
    harness.interact(door, actor);
    assert_eq!(harness.audio.count(&ClipId::new("door/open")), 1);

    // One second of animation plus slack: fully open, creaked once (the
    // variant is a seeded uniform pick, so count across the set).
    harness.step_seconds(1.5);
    let creaks = harness.audio.count(&ClipId::new("door/creak_1"))
        + harness.audio.count(&ClipId::new("door/creak_2"));
    assert_eq!(creaks, 1);

    // Close it again.
    harness.interact(door, actor);
    harness.step_seconds(1.5);
    assert_eq!(harness.audio.count(&ClipId::new("door/close")), 1);

    // The audible story, in order (the creak variant is seeded).
    let names = clip_names(&harness);
    assert_eq!(names[0], "door/push");
    assert_eq!(names[1], "door/unlock");
    assert_eq!(names[2], "door/open");
    assert!(names[3].starts_with("door/creak_"));
    assert!(names[4].starts_with("door/creak_"));
    assert_eq!(names[5], "door/close");
    assert_eq!(names.len(), 6);
}

#[test]
fn unlocked_sliding_door_opens_and_closes() {
    let mut harness = Harness::new(1, 7);
    let actor = Vec3::new(2.0, 0.0, 0.0);
    let door = harness.spawn_door(1, &door_config(DoorKind::Sliding, false));

    harness.interact(door, actor);
    harness.step_seconds(1.5);
    assert_eq!(harness.audio.count(&ClipId::new("door/open")), 1);

    harness.interact(door, actor);
    harness.step_seconds(1.5);
    // A finished slide plays the close clip twice: once late in the
    // animation and once on completion.
    assert_eq!(harness.audio.count(&ClipId::new("door/close")), 2);
}

#[test]
fn locking_consumes_the_key_when_configured() {
    let mut harness = Harness::new(1, 3);
    let actor = Vec3::new(2.0, 0.0, 0.0);
    let mut config = door_config(DoorKind::Rotating, true);
    config.remove_key_on_use = true;
    let door = harness.spawn_door(1, &config);

    harness.inventory.insert(KeyId(0));
    harness.alternate(door, actor);
    assert_eq!(harness.audio.count(&ClipId::new("door/unlock")), 1);
    assert!(!harness.inventory.contains(KeyId(0)));

    // Without the key the door can no longer be re-locked.
    harness.alternate(door, actor);
    assert_eq!(harness.audio.count(&ClipId::new("door/lock")), 0);
}

#[test]
fn audio_log_round_trips_through_jsonl() {
    let mut harness = Harness::new(1, 5);
    let actor = Vec3::new(2.0, 0.0, 0.0);
    let door = harness.spawn_door(1, &door_config(DoorKind::Sliding, false));

    harness.interact(door, actor);
    harness.step_seconds(1.5);

    let path = std::env::temp_dir().join("latchkey_audio_log.jsonl");
    harness.dump_audio(&path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), harness.audio.events().len());
    assert!(lines[0].contains("\"seq\":0"));
    assert!(lines[0].contains("door/open"));
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn retrying_during_cooldown_stays_silent() {
    let mut harness = Harness::new(1, 11);
    let actor = Vec3::new(2.0, 0.0, 0.0);
    let door = harness.spawn_door(1, &door_config(DoorKind::Rotating, false));

    harness.interact(door, actor);
    for _ in 0..5 {
        harness.step(2);
        harness.interact(door, actor);
    }
    // Half a second in: still one open sound, still opening.
    assert_eq!(harness.audio.count(&ClipId::new("door/open")), 1);
}
