extern crate gl;
extern crate glid;
extern crate glutin;
extern crate nalgebra;
#[macro_use]
extern crate log;

use std::ffi::CString;
use std::mem;
use std::process;
use std::ptr;
use std::time::Instant;

use gl::types::{GLchar, GLint, GLsizei, GLsizeiptr, GLuint};
use glid::check_gl;
use glid::kind::{Buffer, Program, Shader, ShaderStage, VertexArray};
use glid::Resource;
use glutin::event::{Event, WindowEvent};
use glutin::event_loop::{ControlFlow, EventLoop};
use log::LevelFilter;
use nalgebra::{Matrix4, Vector3};
use simple_logger::SimpleLogger;

static VERTEX_SRC: &str = r#"
#version 330 core
layout (location = 0) in vec3 position;
uniform mat4 transform;
void main() {
    gl_Position = transform * vec4(position, 1.0);
}
"#;

static FRAGMENT_SRC: &str = r#"
#version 330 core
out vec4 color;
void main() {
    color = vec4(0.9, 0.4, 0.1, 1.0);
}
"#;

static TRIANGLE: [f32; 9] = [-0.5, -0.5, 0.0, 0.5, -0.5, 0.0, 0.0, 0.5, 0.0];

fn shader_info_log(id: GLuint) -> String {
    let mut len = 0;
    unsafe { check_gl!(gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut len)) };
    let mut buf = vec![0u8; len as usize];
    unsafe {
        check_gl!(gl::GetShaderInfoLog(
            id,
            len,
            ptr::null_mut(),
            buf.as_mut_ptr() as *mut GLchar,
        ))
    };
    String::from_utf8_lossy(&buf)
        .trim_end_matches('\0')
        .to_string()
}

fn program_info_log(id: GLuint) -> String {
    let mut len = 0;
    unsafe { check_gl!(gl::GetProgramiv(id, gl::INFO_LOG_LENGTH, &mut len)) };
    let mut buf = vec![0u8; len as usize];
    unsafe {
        check_gl!(gl::GetProgramInfoLog(
            id,
            len,
            ptr::null_mut(),
            buf.as_mut_ptr() as *mut GLchar,
        ))
    };
    String::from_utf8_lossy(&buf)
        .trim_end_matches('\0')
        .to_string()
}

// Shader compilation consumes the managed handles; the crate only owns
// them. A failed compile is fatal here.
fn compile_stage(stage: ShaderStage, source: &str) -> Resource<Shader> {
    let mut shader = Resource::<Shader>::new();
    shader.make(stage);

    let src = CString::new(source).expect("shader source contained a NUL byte");
    unsafe {
        check_gl!(gl::ShaderSource(
            shader.get(),
            1,
            &src.as_ptr(),
            ptr::null(),
        ));
        check_gl!(gl::CompileShader(shader.get()));
    }

    let mut status = 0;
    unsafe { check_gl!(gl::GetShaderiv(shader.get(), gl::COMPILE_STATUS, &mut status)) };
    if status == 0 {
        error!(
            "{:?} shader failed to compile:\n{}",
            stage,
            shader_info_log(shader.get())
        );
        process::exit(1);
    }
    shader
}

fn link_program(stages: &[Resource<Shader>]) -> Resource<Program> {
    let mut program = Resource::<Program>::new();
    program.make(());

    unsafe {
        for stage in stages {
            check_gl!(gl::AttachShader(program.get(), stage.get()));
        }
        check_gl!(gl::LinkProgram(program.get()));
        for stage in stages {
            check_gl!(gl::DetachShader(program.get(), stage.get()));
        }
    }

    let mut status = 0;
    unsafe { check_gl!(gl::GetProgramiv(program.get(), gl::LINK_STATUS, &mut status)) };
    if status == 0 {
        error!(
            "program failed to link:\n{}",
            program_info_log(program.get())
        );
        process::exit(1);
    }
    program
}

fn main() {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
        .unwrap();

    let event_loop = EventLoop::new();

    let wb = glutin::window::WindowBuilder::new()
        .with_inner_size(glutin::dpi::Size::Physical(glutin::dpi::PhysicalSize::new(
            640, 480,
        )))
        .with_title("triangle".to_string());

    let context = glutin::ContextBuilder::new()
        .with_vsync(true)
        .build_windowed(wb, &event_loop)
        .expect("failed to build window");
    let context = unsafe {
        context
            .make_current()
            .expect("failed to make the context current")
    };

    gl::load_with(|symbol| context.get_proc_address(symbol) as *const _);

    let program = {
        let vertex = compile_stage(ShaderStage::Vertex, VERTEX_SRC);
        let fragment = compile_stage(ShaderStage::Fragment, FRAGMENT_SRC);
        link_program(&[vertex, fragment])
        // both shader objects are deleted here; the program keeps the
        // linked binaries
    };

    let mut vao = Resource::<VertexArray>::new();
    vao.make(());
    let mut vbo = Resource::<Buffer>::new();
    vbo.make(());

    {
        let _array = vao.bind();
        let _buffer = vbo.bind();
        unsafe {
            check_gl!(gl::BufferData(
                gl::ARRAY_BUFFER,
                mem::size_of_val(&TRIANGLE) as GLsizeiptr,
                TRIANGLE.as_ptr() as *const _,
                gl::STATIC_DRAW,
            ));
            check_gl!(gl::VertexAttribPointer(
                0,
                3,
                gl::FLOAT,
                gl::FALSE,
                3 * mem::size_of::<f32>() as GLsizei,
                ptr::null(),
            ));
            check_gl!(gl::EnableVertexAttribArray(0));
        }
    }

    let uniform_name = CString::new("transform").unwrap();
    let transform_loc: GLint =
        unsafe { check_gl!(gl::GetUniformLocation(program.get(), uniform_name.as_ptr())) };

    info!("scene ready, entering the event loop");
    let started = Instant::now();

    event_loop.run(move |event, _, control_flow| match event {
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => {
            *control_flow = ControlFlow::Exit;
        }
        Event::MainEventsCleared => {
            let angle = started.elapsed().as_secs_f32();
            let transform = Matrix4::new_rotation(Vector3::new(0.0, 0.0, angle));

            unsafe {
                check_gl!(gl::ClearColor(0.1, 0.1, 0.1, 1.0));
                check_gl!(gl::Clear(gl::COLOR_BUFFER_BIT));
                check_gl!(gl::UseProgram(program.get()));
                check_gl!(gl::UniformMatrix4fv(
                    transform_loc,
                    1,
                    gl::FALSE,
                    transform.as_slice().as_ptr(),
                ));
            }

            {
                let _array = vao.bind();
                let _buffer = vbo.bind();
                unsafe { check_gl!(gl::DrawArrays(gl::TRIANGLES, 0, 3)) };
            }

            context.swap_buffers().expect("failed to swap buffers");
        }
        _ => {}
    });
}
