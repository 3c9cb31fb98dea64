//! The shape programs, each a [`Scene`] renderers can draw.

mod double_pyramid;
mod moving_globe;
mod ping_pong;
mod shape_set;
mod suits;

pub use double_pyramid::DoublePyramidScene;
pub use moving_globe::MovingGlobeScene;
pub use ping_pong::PingPongScene;
pub use shape_set::ShapeSetScene;
pub use suits::SuitsScene;

use crate::config::SceneConfig;
use crate::scene::{Scene, SceneKind};

/// Build the scene `kind` from its section of `config`
pub fn build_scene(kind: SceneKind, config: &SceneConfig) -> Box<dyn Scene> {
    log::info!("building scene {kind}");
    match kind {
        SceneKind::PingPong => Box::new(PingPongScene::new(&config.ping_pong, config.seed)),
        SceneKind::DoublePyramid => {
            Box::new(DoublePyramidScene::new(&config.double_pyramid, config.seed))
        }
        SceneKind::Suits => Box::new(SuitsScene::new()),
        SceneKind::ShapeSet => Box::new(ShapeSetScene::new(&config.shape_set)),
        SceneKind::MovingGlobe => Box::new(MovingGlobeScene::new(config.seed)),
    }
}

/// Step `value` by `delta`, clamped to `[min, max]`
pub(crate) fn step_control(value: u32, delta: i32, min: u32, max: u32) -> u32 {
    (i64::from(value) + i64::from(delta)).clamp(i64::from(min), i64::from(max)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_scene_is_consistent() {
        let config = SceneConfig::default();
        for kind in SceneKind::ALL {
            let mut scene = build_scene(kind, &config);
            assert_eq!(scene.name(), kind.as_str());
            scene.update(1.0 / 60.0);
            assert_eq!(scene.vertex_colors().len(), scene.mesh().vertex_count());
            for call in scene.draw_calls() {
                assert!(call.first + call.count <= scene.mesh().vertex_count());
                assert_eq!(call.count % 3, 0);
            }
        }
    }

    #[test]
    fn test_step_control_clamps() {
        assert_eq!(step_control(3, -5, 3, 10), 3);
        assert_eq!(step_control(9, 4, 3, 10), 10);
        assert_eq!(step_control(5, 1, 3, 10), 6);
    }
}
