/// cgshapes web - WebGL2 renderer for the shape scenes
///
/// The page owns the animation loop: it calls `frame(dt)` and `render()`
/// from `requestAnimationFrame` and forwards clicks and the numeric control.

use cgshapes_core::{build_scene, Color, RotationState, Scene, SceneConfig, SceneKind, Transform, Viewport};
use nalgebra::Matrix4;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as Gl, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

const VERTEX_SHADER: &str = r#"#version 300 es
in vec4 a_position;
in vec4 a_color;
uniform mat4 u_model_view;
out vec4 v_color;

void main() {
    gl_Position = u_model_view * a_position;
    v_color = a_color;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;
in vec4 v_color;
uniform bool u_use_flat;
uniform vec4 u_flat_color;
out vec4 frag_color;

void main() {
    frag_color = u_use_flat ? u_flat_color : v_color;
}
"#;

const POSITION_LOCATION: u32 = 0;
const COLOR_LOCATION: u32 = 1;

struct Uniforms {
    model_view: Option<WebGlUniformLocation>,
    use_flat: Option<WebGlUniformLocation>,
    flat_color: Option<WebGlUniformLocation>,
}

#[wasm_bindgen]
pub struct WebRenderer {
    gl: Gl,
    canvas: HtmlCanvasElement,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    positions: WebGlBuffer,
    colors: WebGlBuffer,
    uniforms: Uniforms,
    scene: Box<dyn Scene>,
    orbit: RotationState,
}

#[wasm_bindgen]
impl WebRenderer {
    /// Attach to `canvas_id` and build `scene` (ping-pong, double-pyramid, suits, shape-set, moving-globe).
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, scene: &str, seed: u32) -> Result<WebRenderer, JsValue> {
        let kind: SceneKind = scene.parse().map_err(|e: cgshapes_core::SceneParseError| js_error(e.to_string()))?;
        let config = SceneConfig {
            scene: kind,
            seed: u64::from(seed),
            ..SceneConfig::default()
        };

        let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
        let canvas = window
            .document()
            .and_then(|doc| doc.get_element_by_id(canvas_id))
            .ok_or_else(|| js_error(format!("no canvas with id '{canvas_id}'")))?
            .dyn_into::<HtmlCanvasElement>()?;

        let gl = match canvas.get_context("webgl2").ok().flatten() {
            Some(context) => context.dyn_into::<Gl>()?,
            None => {
                window.alert_with_message("WebGL isn't available")?;
                return Err(js_error("WebGL isn't available"));
            }
        };

        let program = link_program(&gl, VERTEX_SHADER, FRAGMENT_SHADER)?;
        let uniforms = Uniforms {
            model_view: gl.get_uniform_location(&program, "u_model_view"),
            use_flat: gl.get_uniform_location(&program, "u_use_flat"),
            flat_color: gl.get_uniform_location(&program, "u_flat_color"),
        };

        let vao = gl
            .create_vertex_array()
            .ok_or_else(|| js_error("failed to create vertex array"))?;
        let positions = gl.create_buffer().ok_or_else(|| js_error("failed to create buffer"))?;
        let colors = gl.create_buffer().ok_or_else(|| js_error("failed to create buffer"))?;

        gl.bind_vertex_array(Some(&vao));
        for (buffer, location) in [(&positions, POSITION_LOCATION), (&colors, COLOR_LOCATION)] {
            gl.bind_buffer(Gl::ARRAY_BUFFER, Some(buffer));
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_with_i32(location, 4, Gl::FLOAT, false, 0, 0);
        }

        let mut renderer = WebRenderer {
            gl,
            canvas,
            program,
            vao,
            positions,
            colors,
            uniforms,
            scene: build_scene(kind, &config),
            orbit: RotationState::zero(),
        };
        renderer.upload();
        log::info!("web renderer ready: {} with {} vertices", kind, renderer.vertex_count());
        Ok(renderer)
    }

    /// Advance the scene by `dt` seconds
    pub fn frame(&mut self, dt: f32) {
        self.scene.update(dt);
    }

    pub fn render(&self) {
        let gl = &self.gl;
        gl.viewport(0, 0, self.canvas.width() as i32, self.canvas.height() as i32);

        let [r, g, b, a] = self.scene.clear_color().to_array();
        gl.clear_color(r, g, b, a);
        let mut mask = Gl::COLOR_BUFFER_BIT;
        if self.scene.depth_test() {
            gl.enable(Gl::DEPTH_TEST);
            mask |= Gl::DEPTH_BUFFER_BIT;
        } else {
            gl.disable(Gl::DEPTH_TEST);
        }
        gl.enable(Gl::BLEND);
        gl.blend_func(Gl::SRC_ALPHA, Gl::ONE_MINUS_SRC_ALPHA);
        gl.clear(mask);

        gl.use_program(Some(&self.program));
        gl.bind_vertex_array(Some(&self.vao));

        let view = orbit_view(self.scene.as_ref(), &self.orbit);
        for call in self.scene.draw_calls() {
            let model_view: Matrix4<f32> = view * call.model_view;
            gl.uniform_matrix4fv_with_f32_array(
                self.uniforms.model_view.as_ref(),
                false,
                model_view.as_slice(),
            );
            let (use_flat, flat) = flat_uniforms(call.color);
            gl.uniform1i(self.uniforms.use_flat.as_ref(), use_flat);
            gl.uniform4fv_with_f32_array(self.uniforms.flat_color.as_ref(), &flat);
            gl.draw_arrays(Gl::TRIANGLES, call.first as i32, call.count as i32);
        }
    }

    /// Step the scene's numeric control; re-uploads the mesh when it changed
    pub fn adjust(&mut self, delta: i32) -> bool {
        let rebuilt = self.scene.adjust(delta);
        if rebuilt {
            self.upload();
        }
        rebuilt
    }

    pub fn control_value(&self) -> Option<u32> {
        self.scene.control_value()
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.scene.set_paused(paused);
    }

    /// Forward a click in canvas pixels; redraws when the scene changed
    pub fn click(&mut self, x: f32, y: f32) -> bool {
        let viewport = Viewport::new(self.canvas.width(), self.canvas.height());
        let changed = self.scene.click(viewport.to_ndc(x, y));
        if changed {
            self.render();
        }
        changed
    }

    /// Orbit the view (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.orbit.rotate(dx, dy, dz);
    }

    pub fn vertex_count(&self) -> usize {
        self.scene.mesh().vertex_count()
    }
}

impl WebRenderer {
    fn upload(&mut self) {
        let positions = self.scene.mesh().position_buffer();
        let colors = color_buffer(self.scene.vertex_colors());

        self.gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&self.positions));
        self.gl.buffer_data_with_u8_array(
            Gl::ARRAY_BUFFER,
            bytemuck::cast_slice(&positions),
            Gl::STATIC_DRAW,
        );
        self.gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&self.colors));
        self.gl.buffer_data_with_u8_array(
            Gl::ARRAY_BUFFER,
            bytemuck::cast_slice(&colors),
            Gl::STATIC_DRAW,
        );
        log::debug!("uploaded {} vertices", positions.len() / 4);
    }
}

/// Orbit rotation applied ahead of every call, unless the scene projects itself
fn orbit_view(scene: &dyn Scene, orbit: &RotationState) -> Matrix4<f32> {
    if scene.includes_projection() {
        Matrix4::identity()
    } else {
        Transform::rotation_matrix(orbit)
    }
}

/// Four floats per vertex colour, in vertex order
fn color_buffer(colors: &[Color]) -> Vec<f32> {
    colors.iter().flat_map(|c| c.to_array()).collect()
}

fn flat_uniforms(color: Option<Color>) -> (i32, [f32; 4]) {
    match color {
        Some(color) => (1, color.to_array()),
        None => (0, Color::WHITE.to_array()),
    }
}

fn js_error(message: impl Into<String>) -> JsValue {
    JsValue::from_str(&message.into())
}

fn compile_shader(gl: &Gl, kind: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| js_error("unable to create shader object"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let info = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(js_error(format!("shader compile failed: {info}")))
    }
}

fn link_program(gl: &Gl, vertex: &str, fragment: &str) -> Result<WebGlProgram, JsValue> {
    let vertex = compile_shader(gl, Gl::VERTEX_SHADER, vertex)?;
    let fragment = compile_shader(gl, Gl::FRAGMENT_SHADER, fragment)?;
    let program = gl
        .create_program()
        .ok_or_else(|| js_error("unable to create program object"))?;

    gl.attach_shader(&program, &vertex);
    gl.attach_shader(&program, &fragment);
    gl.bind_attrib_location(&program, POSITION_LOCATION, "a_position");
    gl.bind_attrib_location(&program, COLOR_LOCATION, "a_color");
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let info = gl.get_program_info_log(&program).unwrap_or_default();
        Err(js_error(format!("program link failed: {info}")))
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    // Setup panic hook for better error messages in browser console
    console_error_panic_hook::set_once();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_buffer_matches_vertices() {
        let config = SceneConfig::default();
        let scene = build_scene(SceneKind::PingPong, &config);
        let colors = color_buffer(scene.vertex_colors());
        assert_eq!(colors.len(), scene.mesh().position_buffer().len());
        assert_eq!(bytemuck::cast_slice::<f32, u8>(&colors).len(), colors.len() * 4);
    }

    #[test]
    fn test_orbit_skips_self_projecting_scenes() {
        let config = SceneConfig::default();
        let orbit = RotationState::new(0.3, 0.2, 0.0);
        let globe = build_scene(SceneKind::MovingGlobe, &config);
        assert_eq!(orbit_view(globe.as_ref(), &orbit), Matrix4::identity());
        let pyramid = build_scene(SceneKind::DoublePyramid, &config);
        assert_eq!(orbit_view(pyramid.as_ref(), &orbit), Transform::rotation_matrix(&orbit));
    }

    #[test]
    fn test_flat_uniforms() {
        assert_eq!(flat_uniforms(None).0, 0);
        let (use_flat, color) = flat_uniforms(Some(Color::RED.with_alpha(0.5)));
        assert_eq!(use_flat, 1);
        assert_eq!(color, [1.0, 0.0, 0.0, 0.5]);
    }

    #[test]
    fn test_shaders_share_attribute_names() {
        assert!(VERTEX_SHADER.contains("a_position"));
        assert!(VERTEX_SHADER.contains("a_color"));
        assert!(FRAGMENT_SHADER.contains("u_flat_color"));
    }
}
