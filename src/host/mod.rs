//! Host collaborator interfaces
//!
//! The simulation never touches a scene graph or the DOM. A host provides:
//! - `Scene`: drawables for platforms, the character and particles
//! - `Hud`: score readouts and the start/game-over overlays

use glam::{Vec2, Vec3};

/// Opaque handle to something the scene draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawableHandle(pub u32);

/// Rendering collaborator
pub trait Scene {
    /// Box platform centered at `position` with extents `size` (0xRRGGBB color)
    fn create_platform_drawable(&mut self, position: Vec3, size: Vec3, color: u32)
    -> DrawableHandle;
    /// Character cube with edge length `size`
    fn create_character_drawable(&mut self, size: f32) -> DrawableHandle;
    /// Small particle sprite
    fn create_particle_drawable(&mut self, position: Vec3, color: u32) -> DrawableHandle;

    fn set_position(&mut self, handle: DrawableHandle, position: Vec3);
    /// Rotation about the x and y axes (radians)
    fn set_rotation(&mut self, handle: DrawableHandle, rotation: Vec2);
    fn set_visible(&mut self, handle: DrawableHandle, visible: bool);
    /// Opacity in [0, 1]
    fn set_opacity(&mut self, handle: DrawableHandle, opacity: f32);
    fn remove_drawable(&mut self, handle: DrawableHandle);

    /// Present the current frame
    fn render_frame(&mut self);
}

/// Presentation collaborator
pub trait Hud {
    fn show_score(&mut self, score: u32);
    fn show_best_score(&mut self, best: u32);
    fn set_start_screen_visible(&mut self, visible: bool);
    /// Toggle the game-over overlay; `final_score` is shown when visible
    fn set_game_over_visible(&mut self, visible: bool, final_score: u32);
}
