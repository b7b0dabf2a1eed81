extern crate gl;
extern crate glid;
extern crate glutin;

use glid::check_gl;
use glutin::event::{Event, WindowEvent};
use glutin::event_loop::{ControlFlow, EventLoop};
use log::LevelFilter;
use simple_logger::SimpleLogger;

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
        .with_title("clear".to_string());

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

    event_loop.run(move |event, _, control_flow| match event {
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => {
            *control_flow = ControlFlow::Exit;
        }
        Event::MainEventsCleared => {
            unsafe {
                check_gl!(gl::ClearColor(0.0, 1.0, 0.0, 1.0));
                check_gl!(gl::Clear(gl::COLOR_BUFFER_BIT));
            }
            context.swap_buffers().expect("failed to swap buffers");
        }
        _ => {}
    });
}
