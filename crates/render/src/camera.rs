use glam::{Mat4, Vec3};
use mosaic_scene::CameraRig;

/// Applies accumulated input to a camera once per frame.
pub trait CameraController {
    fn advance(&mut self);
}

/// Perspective camera orbiting a fixed target.
///
/// Input (`rotate`, `zoom`) only accumulates deltas; `advance` applies a
/// `damping_factor` share of them each frame and decays the rest, so a drag
/// keeps easing out after the pointer stops.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    /// Radians per pixel of drag.
    pub rotate_speed: f32,
    /// Distance scale per unit of scroll.
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    yaw_delta: f32,
    pitch_delta: f32,
    zoom_delta: f32,
}

const PITCH_LIMIT: f32 = 89.0_f32 * std::f32::consts::PI / 180.0;
const SETTLE_EPSILON: f32 = 1e-6;

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_rig(&CameraRig::default())
    }
}

impl OrbitCamera {
    /// Start from a rig's position and target.
    ///
    /// The zoom limits always contain the starting distance, so an idle
    /// camera stays where the rig put it.
    pub fn from_rig(rig: &CameraRig) -> Self {
        let offset = rig.position - rig.target;
        let distance = offset.length().max(f32::EPSILON);
        let min_distance = distance.min(1.0);
        let max_distance = (rig.far * 0.5).max(distance).max(min_distance);
        Self {
            target: rig.target,
            distance,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            fov: rig.fov_degrees.to_radians(),
            aspect: rig.aspect,
            near: rig.near,
            far: rig.far,
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 0.005,
            zoom_speed: 0.95,
            min_distance,
            max_distance,
            yaw_delta: 0.0,
            pitch_delta: 0.0,
            zoom_delta: 0.0,
        }
    }

    /// Queue a drag of `dx`, `dy` pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw_delta -= dx * self.rotate_speed;
        self.pitch_delta += dy * self.rotate_speed;
    }

    /// Queue a scroll; positive moves closer.
    pub fn zoom(&mut self, amount: f32) {
        self.zoom_delta += amount;
    }

    /// Match the projection to a viewport. Safe to repeat.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// True once no queued input remains.
    pub fn is_settled(&self) -> bool {
        self.yaw_delta == 0.0 && self.pitch_delta == 0.0 && self.zoom_delta == 0.0
    }

    pub fn position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target
            + Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw) * self.distance
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

fn decay(delta: &mut f32, keep: f32) {
    *delta *= keep;
    if delta.abs() < SETTLE_EPSILON {
        *delta = 0.0;
    }
}

impl CameraController for OrbitCamera {
    fn advance(&mut self) {
        let share = if self.enable_damping {
            self.damping_factor.clamp(0.0, 1.0)
        } else {
            1.0
        };

        self.yaw += self.yaw_delta * share;
        self.pitch = (self.pitch + self.pitch_delta * share).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        if self.zoom_delta != 0.0 {
            let (lo, hi) = (
                self.min_distance.min(self.max_distance),
                self.min_distance.max(self.max_distance),
            );
            self.distance =
                (self.distance * self.zoom_speed.powf(self.zoom_delta * share)).clamp(lo, hi);
        }

        let keep = 1.0 - share;
        decay(&mut self.yaw_delta, keep);
        decay(&mut self.pitch_delta, keep);
        decay(&mut self.zoom_delta, keep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rig_reproduces_position() {
        let rig = CameraRig {
            position: Vec3::new(3.0, 4.0, 12.0),
            target: Vec3::new(1.0, 0.0, 0.0),
            ..CameraRig::default()
        };
        let cam = OrbitCamera::from_rig(&rig);
        assert!((cam.position() - rig.position).length() < 1e-4);
    }

    #[test]
    fn default_camera_looks_at_origin() {
        let cam = OrbitCamera::default();
        assert_eq!(cam.target, Vec3::ZERO);
        assert!((cam.position() - Vec3::new(0.0, 0.0, 30.0)).length() < 1e-4);
        let vp = cam.view_projection();
        // Should produce a valid matrix (no NaN)
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn input_waits_for_advance() {
        let mut cam = OrbitCamera::default();
        let start = cam.position();
        cam.rotate(40.0, 0.0);
        assert_eq!(cam.position(), start);
        cam.advance();
        assert_ne!(cam.position(), start);
    }

    #[test]
    fn undamped_applies_full_delta() {
        let mut cam = OrbitCamera {
            enable_damping: false,
            ..OrbitCamera::default()
        };
        cam.rotate(100.0, 0.0);
        cam.advance();
        assert!((cam.yaw + 100.0 * cam.rotate_speed).abs() < 1e-6);
        assert!(cam.is_settled());
    }

    #[test]
    fn damped_rotation_converges_to_full_delta() {
        let mut cam = OrbitCamera::default();
        cam.rotate(100.0, 0.0);
        for _ in 0..1_000 {
            cam.advance();
        }
        assert!(cam.is_settled());
        assert!((cam.yaw + 100.0 * cam.rotate_speed).abs() < 1e-3);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = OrbitCamera {
            enable_damping: false,
            ..OrbitCamera::default()
        };
        cam.rotate(0.0, 100_000.0);
        cam.advance();
        assert!(cam.pitch <= PITCH_LIMIT);
        assert!(!cam.view_projection().col(0).x.is_nan());
    }

    #[test]
    fn zoom_moves_closer_and_respects_limits() {
        let mut cam = OrbitCamera {
            enable_damping: false,
            ..OrbitCamera::default()
        };
        let start = cam.distance;
        cam.zoom(3.0);
        cam.advance();
        assert!(cam.distance < start);

        cam.zoom(10_000.0);
        cam.advance();
        assert_eq!(cam.distance, cam.min_distance);
    }

    #[test]
    fn short_far_plane_does_not_panic() {
        let rig = CameraRig {
            near: 0.1,
            far: 1.0,
            position: Vec3::new(0.0, 0.0, 0.5),
            ..CameraRig::default()
        };
        let mut cam = OrbitCamera::from_rig(&rig);
        assert!(cam.min_distance <= cam.max_distance);
        cam.advance();
        cam.zoom(-5.0);
        cam.advance();
        assert!(cam.distance <= cam.max_distance);
    }

    #[test]
    fn idle_advance_keeps_position() {
        let rig = CameraRig {
            far: 20.0,
            ..CameraRig::default()
        };
        let mut cam = OrbitCamera::from_rig(&rig);
        let start = cam.position();
        for _ in 0..10 {
            cam.advance();
        }
        assert_eq!(cam.position(), start);
        assert_eq!(cam.distance, 30.0);

        let close = CameraRig {
            position: Vec3::new(0.0, 0.0, 0.25),
            ..CameraRig::default()
        };
        let mut cam = OrbitCamera::from_rig(&close);
        cam.advance();
        assert!((cam.distance - 0.25).abs() < 1e-6);
    }

    #[test]
    fn viewport_sets_aspect() {
        let mut cam = OrbitCamera::default();
        cam.set_viewport(1024, 768);
        assert_eq!(cam.aspect, 1024.0 / 768.0);
        cam.set_viewport(1024, 768);
        assert_eq!(cam.aspect, 1024.0 / 768.0);
        cam.set_viewport(640, 0);
        assert!(cam.aspect.is_finite());
    }
}
