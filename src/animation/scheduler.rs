use std::sync::Arc;

use glam::{Quat, Vec2, Vec3};
use smallvec::SmallVec;

use crate::animation::camera_path::ScriptedPath;
use crate::animation::clock::FrameClock;
use crate::animation::state::{AnimationState, ControlMode};
use crate::assembly::DustVolume;
use crate::controls::{OrbitController, PointerInput};
use crate::narration::{NarrationEvent, NarrationSequencer};
use crate::resources::texture::Texture;
use crate::scene::{CameraPose, Motion, NodeHandle, NodeTags, Scene};

/// How dust reflects off the sides of its volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DustSettings {
    /// Fraction of speed kept when bouncing off the boundary.
    pub restitution: f32,
    /// Frame rate velocities are expressed against.
    pub reference_rate: f32,
}

impl Default for DustSettings {
    fn default() -> Self {
        Self {
            restitution: 0.9,
            reference_rate: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerSettings {
    pub max_dt: f32,
    pub fallback_dt: f32,

    /// Water UV scroll, per second.
    pub water_scroll_speed: f32,

    pub splash_height: f32,
    pub splash_bob_rate: f32,
    pub splash_scale_rate: f32,
    pub splash_base_scale: f32,
    pub splash_scale_amplitude: f32,

    pub pulse_rate: f32,
    pub pulse_amplitude: f32,

    /// Head tilt around X on activation, radians.
    pub reaction_tilt: f32,
    pub reaction_duration: f32,

    pub dust: DustSettings,
    pub path: ScriptedPath,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            max_dt: 0.25,
            fallback_dt: 0.0,
            water_scroll_speed: 2.5,
            splash_height: 0.5,
            splash_bob_rate: 10.0,
            splash_scale_rate: 12.0,
            splash_base_scale: 0.8,
            splash_scale_amplitude: 0.2,
            pulse_rate: 20.0,
            pulse_amplitude: 0.02,
            reaction_tilt: 0.3,
            reaction_duration: 0.4,
            dust: DustSettings::default(),
            path: ScriptedPath::default(),
        }
    }
}

/// Collaborators the scheduler touches during one tick.
pub struct FrameContext<'a> {
    pub scene: &'a mut Scene,
    pub narration: &'a mut NarrationSequencer,
    pub orbit: &'a mut dyn OrbitController,
    pub input: &'a PointerInput,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Sanitised delta.
    pub dt: f32,
    pub elapsed: f32,
    pub mode: ControlMode,
    /// True on the tick the camera was handed to the orbit controller.
    pub entered_free: bool,
    pub pose: CameraPose,
    pub narration: Option<NarrationEvent>,
}

#[derive(Debug, Clone, Copy)]
struct Reaction {
    node: NodeHandle,
    rest: Quat,
    remaining: f32,
}

/// One step of dust integration.
///
/// Moves by `velocity * dt * reference_rate`, wraps vertically between
/// the volume's floor and ceiling, then bounces off its sides when moving
/// outward. Returns the new position and velocity.
#[must_use]
pub fn step_dust(
    position: Vec3,
    velocity: Vec3,
    dt: f32,
    volume: &DustVolume,
    settings: &DustSettings,
) -> (Vec3, Vec3) {
    let mut position = position + velocity * dt * settings.reference_rate;
    let mut velocity = velocity;

    if position.y > volume.ceiling {
        position.y = volume.floor;
    } else if position.y < volume.floor {
        position.y = volume.ceiling;
    }

    if position.x.abs() > volume.half_extent && position.x * velocity.x > 0.0 {
        velocity.x *= -settings.restitution;
    }
    if position.z.abs() > volume.half_extent && position.z * velocity.z > 0.0 {
        velocity.z *= -settings.restitution;
    }
    (position, velocity)
}

/// Drives everything that moves.
///
/// Owns the clock and the control mode. Each [`tick`](Self::tick) sanitises
/// the delta, advances narration while scripted, places the camera, then
/// integrates water, motions and reactions before refreshing world matrices.
pub struct AnimationScheduler {
    settings: SchedulerSettings,
    dust_volume: DustVolume,
    state: AnimationState,
    animated: Vec<NodeHandle>,
    water_textures: Vec<Arc<Texture>>,
    reactions: SmallVec<[Reaction; 2]>,
}

impl AnimationScheduler {
    /// Collects the scene's animated nodes once; the scene is not grown
    /// after construction. `dust_volume` is the one the dust was spawned in.
    #[must_use]
    pub fn new(settings: SchedulerSettings, dust_volume: DustVolume, scene: &Scene, initial_pose: CameraPose) -> Self {
        let animated: Vec<NodeHandle> = scene
            .traverse_all()
            .filter(|(_, node)| node.motion.is_some())
            .map(|(handle, _)| handle)
            .collect();

        let mut water_textures: Vec<Arc<Texture>> = Vec::new();
        for (_, node) in scene.find_all_by_tag(NodeTags::WATER) {
            let Some(texture) = node.mesh.as_ref().and_then(|m| m.appearance.texture.as_ref()) else {
                continue;
            };
            if !water_textures.iter().any(|t| Arc::ptr_eq(t, texture)) {
                water_textures.push(Arc::clone(texture));
            }
        }

        log::debug!(
            "Scheduler tracks {} animated nodes and {} water textures",
            animated.len(),
            water_textures.len()
        );

        let clock = FrameClock::new(settings.max_dt, settings.fallback_dt);
        Self {
            settings,
            dust_volume,
            state: AnimationState::new(clock, initial_pose),
            animated,
            water_textures,
            reactions: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &SchedulerSettings {
        &self.settings
    }

    #[must_use]
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> ControlMode {
        self.state.mode()
    }

    #[must_use]
    pub fn water_texture_count(&self) -> usize {
        self.water_textures.len()
    }

    #[must_use]
    pub fn has_pending_reaction(&self) -> bool {
        !self.reactions.is_empty()
    }

    pub fn tick(&mut self, raw_dt: f32, ctx: FrameContext<'_>) -> Tick {
        let FrameContext {
            scene,
            narration,
            orbit,
            input,
        } = ctx;

        let dt = self.state.clock.tick(raw_dt);
        let t = self.state.clock.elapsed_secs();

        let mut entered_free = false;
        let mut event = None;
        if self.state.mode() == ControlMode::Scripted {
            event = narration.update(dt);
            self.state.narration_index = narration.current().map(|(i, _)| i);
            if narration.is_completed() {
                entered_free = self.hand_over(orbit);
            }
        }

        let pose = match self.state.mode() {
            ControlMode::Scripted => self.settings.path.pose(t),
            ControlMode::Free => orbit.update(input, dt),
        };
        self.state.camera = pose;

        for texture in &self.water_textures {
            texture.scroll(Vec2::new(0.0, -dt * self.settings.water_scroll_speed));
        }

        self.apply_motions(scene, dt, t);
        self.update_reactions(scene, dt);
        scene.update_matrix_world();

        Tick {
            dt,
            elapsed: t,
            mode: self.state.mode(),
            entered_free,
            pose,
            narration: event,
        }
    }

    /// Cancels the intro and hands the camera over. Returns false when the
    /// camera was already free.
    pub fn skip_intro(&mut self, narration: &mut NarrationSequencer, orbit: &mut dyn OrbitController) -> bool {
        narration.skip();
        self.hand_over(orbit)
    }

    /// Tilts the target's reaction part and schedules its restore.
    ///
    /// Re-triggering a pending reaction restarts its timer and keeps the
    /// first rest rotation. Returns false when the target has no
    /// reaction part in its subtree.
    pub fn trigger_reaction(&mut self, scene: &mut Scene, target: NodeHandle) -> bool {
        let Some(part_name) = scene
            .get_node(target)
            .and_then(|n| n.interactive.as_ref())
            .and_then(|i| i.reaction_part.clone())
        else {
            return false;
        };
        let Some(part) = scene.find_by_name_in_subtree(target, &part_name) else {
            log::warn!("Reaction part '{part_name}' not found under target");
            return false;
        };

        let duration = self.settings.reaction_duration;
        let rest = if let Some(pending) = self.reactions.iter_mut().find(|r| r.node == part) {
            pending.remaining = duration;
            pending.rest
        } else {
            let Some(node) = scene.get_node(part) else {
                return false;
            };
            let rest = node.transform.rotation;
            self.reactions.push(Reaction {
                node: part,
                rest,
                remaining: duration,
            });
            rest
        };

        if let Some(node) = scene.get_node_mut(part) {
            node.transform.rotation = rest * Quat::from_rotation_x(self.settings.reaction_tilt);
        }
        true
    }

    fn hand_over(&mut self, orbit: &mut dyn OrbitController) -> bool {
        if !self.state.enter_free_mode() {
            return false;
        }
        orbit.sync(&self.state.camera);
        log::info!("Camera handed to orbit controls at t = {:.2}s", self.state.elapsed());
        true
    }

    fn apply_motions(&self, scene: &mut Scene, dt: f32, t: f32) {
        let s = &self.settings;
        for &handle in &self.animated {
            let Some(node) = scene.get_node_mut(handle) else {
                continue;
            };
            let Some(motion) = node.motion else {
                continue;
            };
            let transform = &mut node.transform;
            match motion {
                Motion::Splash { phase, rest } => {
                    transform.position.y = rest.y + (t * s.splash_bob_rate + phase).sin().abs() * s.splash_height;
                    let scale = s.splash_base_scale + (t * s.splash_scale_rate + phase).sin() * s.splash_scale_amplitude;
                    transform.scale = Vec3::splat(scale);
                }
                Motion::Pulse { rest_scale } => {
                    let angle = t * s.pulse_rate;
                    transform.scale = rest_scale
                        * Vec3::new(
                            1.0 + angle.sin() * s.pulse_amplitude,
                            1.0,
                            1.0 + angle.cos() * s.pulse_amplitude,
                        );
                }
                Motion::Dust { velocity } => {
                    let (position, velocity) = step_dust(transform.position, velocity, dt, &self.dust_volume, &s.dust);
                    transform.position = position;
                    node.motion = Some(Motion::Dust { velocity });
                }
                Motion::Vibrate { rest, amplitude, rate } => {
                    transform.position.y = rest.y + (t * rate).sin() * amplitude;
                }
            }
        }
    }

    fn update_reactions(&mut self, scene: &mut Scene, dt: f32) {
        self.reactions.retain(|reaction| {
            reaction.remaining -= dt;
            if reaction.remaining > 0.0 {
                return true;
            }
            if let Some(node) = scene.get_node_mut(reaction.node) {
                node.transform.rotation = reaction.rest;
            }
            false
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dust_wraps_above_ceiling() {
        let settings = DustSettings::default();
        let volume = DustVolume::default();
        let (p, v) = step_dust(Vec3::new(0.0, 29.99, 0.0), Vec3::new(0.0, 0.02, 0.0), 1.0 / 60.0, &volume, &settings);
        assert_eq!(p.y, 0.0);
        assert_eq!(v.y, 0.02);
    }

    #[test]
    fn dust_bounces_off_boundary() {
        let settings = DustSettings::default();
        let volume = DustVolume::default();
        let (_, v) = step_dust(Vec3::new(29.99, 5.0, 0.0), Vec3::new(0.02, 0.0, 0.0), 1.0 / 60.0, &volume, &settings);
        assert!((v.x + 0.018).abs() < 1e-6);
    }

    #[test]
    fn dust_moving_inward_is_left_alone() {
        let settings = DustSettings::default();
        let volume = DustVolume::default();
        let (_, v) = step_dust(Vec3::new(31.0, 5.0, 0.0), Vec3::new(-0.02, 0.0, 0.0), 1.0 / 60.0, &volume, &settings);
        assert_eq!(v.x, -0.02);
    }
}
