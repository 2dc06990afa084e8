//! First-person player controller: movement, look, and the focus/interact
//! dispatch protocol.

use crate::config::{ControlsConfig, PlayerSpawn};
use crate::input::ActionState;
use glam::Vec3;
use latchkey_core::ObjectId;
use latchkey_interact::{Interactable, InteractionCtx, World};
use latchkey_physics::{move_character, Aabb, Layer};

/// Camera height above the feet.
const EYE_HEIGHT: f32 = 1.6;
/// Body collider size (width, height, depth).
const BODY_SIZE: Vec3 = Vec3::new(0.6, 1.8, 0.6);
/// Viewport aspect ratio used to shape the interaction ray.
const ASPECT: f32 = 16.0 / 9.0;

enum Dispatch {
    Interact,
    Alternate,
}

/// Per-tick player state: avatar movement plus the interaction protocol.
pub struct PlayerController {
    /// Feet position.
    position: Vec3,
    velocity_y: f32,
    grounded: bool,
    yaw: f32,
    pitch: f32,
    focused: Option<ObjectId>,

    walk_speed: f32,
    gravity: f32,
    look_speed_x: f32,
    look_speed_y: f32,
    upper_look_limit: f32,
    lower_look_limit: f32,
    fov: f32,
    interaction_distance: f32,
    ray_point: [f32; 2],
}

impl PlayerController {
    /// Create a controller at the spawn point with the given tuning.
    pub fn new(spawn: &PlayerSpawn, controls: &ControlsConfig) -> Self {
        Self {
            position: spawn.position,
            velocity_y: 0.0,
            grounded: false,
            yaw: spawn.yaw_degrees.to_radians(),
            pitch: 0.0,
            focused: None,
            walk_speed: controls.walk_speed,
            gravity: controls.gravity,
            look_speed_x: controls.look_speed_x,
            look_speed_y: controls.look_speed_y,
            upper_look_limit: controls.upper_look_limit.to_radians(),
            lower_look_limit: controls.lower_look_limit.to_radians(),
            fov: controls.fov_degrees.to_radians(),
            interaction_distance: controls.interaction_distance,
            ray_point: controls.ray_point,
        }
    }

    /// Feet position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Currently focused object, if any.
    pub fn focused(&self) -> Option<ObjectId> {
        self.focused
    }

    /// Whether the body rested on something last tick.
    pub fn grounded(&self) -> bool {
        self.grounded
    }

    /// Run one tick: move, look, then the focus/interact protocol.
    pub fn update(
        &mut self,
        dt: f32,
        action: &ActionState,
        world: &mut World,
        ctx: &mut InteractionCtx<'_>,
    ) {
        self.apply_movement(dt, action, world);
        self.apply_look(action);

        // Doors read the actor position when deciding swing direction.
        ctx.actor_position = self.position;

        self.update_focus(world, ctx);
        if action.interact_pressed {
            self.dispatch(world, ctx, Dispatch::Interact);
        }
        if action.alternate_pressed {
            self.dispatch(world, ctx, Dispatch::Alternate);
        }
    }

    fn apply_movement(&mut self, dt: f32, action: &ActionState, world: &World) {
        let forward = Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin());
        let right = Vec3::new(-self.yaw.sin(), 0.0, self.yaw.cos());

        let mut planar = forward * action.move_z + right * action.move_x;
        if planar.length_squared() > 1.0 {
            planar = planar.normalize();
        }
        planar *= self.walk_speed;

        // Gravity always pulls; a grounded body just has its probe clamped
        // to zero by the floor each tick, which keeps `grounded` stable.
        self.velocity_y -= self.gravity * dt;

        let displacement = (planar + Vec3::Y * self.velocity_y) * dt;
        let result = move_character(world.colliders(), self.body_aabb(), displacement);
        self.position += result.offset;
        self.grounded = result.grounded;
        if self.grounded && self.velocity_y < 0.0 {
            self.velocity_y = 0.0;
        }
    }

    fn apply_look(&mut self, action: &ActionState) {
        self.yaw += action.look_x * self.look_speed_x;
        self.pitch += action.look_y * self.look_speed_y;
        self.pitch = self
            .pitch
            .clamp(-self.lower_look_limit, self.upper_look_limit);
    }

    /// Focus-detection pass: unfiltered cast, layer checked on the hit.
    fn update_focus(&mut self, world: &mut World, ctx: &mut InteractionCtx<'_>) {
        let (origin, direction) = self.view_ray();
        let hit = world.cast_ray(origin, direction, self.interaction_distance, None);

        match hit {
            Some(hit) if hit.layer == Layer::INTERACTABLE => {
                if self.focused != Some(hit.object) {
                    if let Some(old) = self.focused.take() {
                        if let Some(object) = world.get_mut(old) {
                            object.on_lose_focus(ctx);
                        }
                    }
                    if let Some(object) = world.get_mut(hit.object) {
                        object.on_focus(ctx);
                        self.focused = Some(hit.object);
                    }
                }
            }
            _ => {
                // An expired focus target simply stops resolving; no
                // LoseFocus is delivered to an object that no longer exists.
                if let Some(old) = self.focused.take() {
                    if let Some(object) = world.get_mut(old) {
                        object.on_lose_focus(ctx);
                    }
                }
            }
        }
    }

    /// Action pass: re-cast with the layer filter before dispatching to the
    /// focused object. The detection pass is deliberately broader.
    fn dispatch(&mut self, world: &mut World, ctx: &mut InteractionCtx<'_>, kind: Dispatch) {
        let Some(focused) = self.focused else {
            return;
        };
        let (origin, direction) = self.view_ray();
        if world
            .cast_ray(
                origin,
                direction,
                self.interaction_distance,
                Some(Layer::INTERACTABLE),
            )
            .is_none()
        {
            return;
        }
        if let Some(object) = world.get_mut(focused) {
            match kind {
                Dispatch::Interact => object.on_interact(ctx),
                Dispatch::Alternate => object.on_alternate_interact(ctx),
            }
        }
    }

    fn body_aabb(&self) -> Aabb {
        let center = self.position + Vec3::Y * (BODY_SIZE.y * 0.5);
        Aabb::from_center_size(center, BODY_SIZE)
    }

    fn eye(&self) -> Vec3 {
        self.position + Vec3::Y * EYE_HEIGHT
    }

    fn view_forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Interaction ray through the configured viewport point.
    fn view_ray(&self) -> (Vec3, Vec3) {
        let forward = self.view_forward();
        let right = Vec3::new(-self.yaw.sin(), 0.0, self.yaw.cos());
        let up = right.cross(forward).normalize();

        let half_h = (self.fov * 0.5).tan();
        let half_w = half_h * ASPECT;
        let ndc_x = (self.ray_point[0] - 0.5) * 2.0;
        let ndc_y = (0.5 - self.ray_point[1]) * 2.0;

        let direction = (forward + right * ndc_x * half_w + up * ndc_y * half_h).normalize();
        (self.eye(), direction)
    }
}
