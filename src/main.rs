extern crate nalgebra_glm as glm;

use anyhow::{anyhow, Context as _};
use clap::Parser;
use glsl_program::{GlBackend, RenderContext, ShaderProgram};
use std::{path::PathBuf, time::Instant};
use tracing::{debug, info, warn};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

const SCREEN_WIDTH: u32 = 800;
const SCREEN_HEIGHT: u32 = 600;

/// Draws a triangle with a program built from two GLSL files.
#[derive(Debug, Parser)]
struct Args {
    /// Vertex shader source.
    #[arg(long, default_value = "shaders/triangle.vert")]
    vertex: PathBuf,
    /// Fragment shader source.
    #[arg(long, default_value = "shaders/triangle.frag")]
    fragment: PathBuf,
    #[arg(long, default_value_t = SCREEN_WIDTH)]
    width: u32,
    #[arg(long, default_value_t = SCREEN_HEIGHT)]
    height: u32,
    #[arg(long)]
    fullscreen: bool,
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy()
        .add_directive("glsl_program=debug".parse().expect("static directive"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let sdl = sdl2::init().map_err(|e| anyhow!(e)).context("init sdl2")?;
    let video_system = sdl
        .video()
        .map_err(|e| anyhow!(e))
        .context("initialize video system")?;
    {
        let attr = video_system.gl_attr();
        attr.set_context_profile(sdl2::video::GLProfile::Core);
        attr.set_context_version(3, 3);
    }

    let mut window = video_system.window("glsl-program", args.width, args.height);
    window.opengl().resizable();
    if args.fullscreen {
        window.fullscreen_desktop();
    }
    let window = window.build().context("create window")?;
    let _gl_context = window
        .gl_create_context()
        .map_err(|e| anyhow!(e))
        .context("create OpenGL context")?;

    // The context above is current on this thread for the rest of `main`.
    let ctx = RenderContext::new(unsafe {
        GlBackend::load_with(|s| video_system.gl_get_proc_address(s) as *const _)
    });

    let program = ShaderProgram::from_files(&ctx, &args.vertex, &args.fragment)
        .with_context(|| {
            format!(
                "build program from {} and {}",
                args.vertex.display(),
                args.fragment.display()
            )
        })?;
    for (name, ty) in program.active_uniforms() {
        info!(program = program.id(), "uniform {}: {}", name, ty);
    }

    let mut vao = 0;
    unsafe {
        gl::GenVertexArrays(1, &mut vao);
        gl::BindVertexArray(vao);
    }

    let mut event_pump = sdl.event_pump().map_err(|e| anyhow!(e))?;
    let mut grayscale = false;
    let start = Instant::now();
    'app: loop {
        for event in event_pump.poll_iter() {
            use sdl2::event::Event;
            match event {
                Event::Quit { .. } => {
                    break 'app;
                }
                Event::KeyDown { scancode, .. } => {
                    use sdl2::keyboard::Scancode::*;
                    match scancode {
                        Some(Escape) => {
                            break 'app;
                        }
                        Some(Space) => {
                            grayscale = !grayscale;
                        }
                        Some(I) => {
                            match program.get_float("intensity") {
                                Ok(intensity) => info!(intensity),
                                Err(e) => warn!("{}", e),
                            }
                            match program.get_bool("grayscale") {
                                Ok(grayscale) => info!(grayscale),
                                Err(e) => warn!("{}", e),
                            }
                        }
                        _ => {}
                    }
                }
                Event::Window { win_event, .. } => {
                    use sdl2::event::WindowEvent;
                    if let WindowEvent::SizeChanged(width, height) = win_event {
                        debug!(width, height, "resized");
                        unsafe { gl::Viewport(0, 0, width, height) };
                    }
                }
                _ => {}
            }
        }

        let time = start.elapsed().as_secs_f32();
        let model = glm::rotate(
            &glm::identity(),
            time,
            &glm::vec3(0.0, 0.0, 1.0),
        );

        program.use_program();
        program.set_mat4("model", &model);
        program.set_float("intensity", 0.75 + 0.25 * time.sin());
        program.set_bool("grayscale", grayscale);

        unsafe {
            gl::ClearColor(0.1, 0.2, 0.3, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
            gl::DrawArrays(gl::TRIANGLES, 0, 3);
        }
        window.gl_swap_window();
    }

    unsafe { gl::DeleteVertexArrays(1, &vao) };
    Ok(())
}
