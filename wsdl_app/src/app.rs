use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use sdl3::sys::keycode::SDLK_ESCAPE;
use tracing::{debug, info, warn};
use wsdl_lib::event::{ButtonAction, Key, MouseButtonEvent, MouseWheel, Quit, WindowEvent};
use wsdl_lib::video::argb8888;
use wsdl_lib::{
    Color, Context, EventPump, Observer, Surface, Window, WindowId, WindowRegistry,
};
use crate::config::AppConfig;
use crate::error::AppResult;

pub struct App {
    // Declared before the context so they are released while SDL is still up
    wnd: Window,
    pub event_pump: EventPump,
    ctx: Context,
    config: AppConfig,
    pub running: bool,
    frame: u32,
}

impl App {
    pub fn new(config: AppConfig) -> AppResult<App> {
        let ctx = Context::with_config(&config.video)?;
        let wnd = Window::new(&ctx, &config.window)?;
        let event_pump = ctx.event_pump()?;

        info!("Opened \"{}\" as window {}", config.window.title, wnd.id());

        Ok(App {
            wnd,
            event_pump,
            ctx,
            config,
            running: true,
            frame: 0,
        })
    }

    pub fn run(&mut self) -> AppResult<()> {
        let creator = self.wnd.texture_creator();
        let (width, height) = (self.config.window.width, self.config.window.height);

        let mut background = creator.create_streaming(argb8888(), width, height)?;
        let mut overlay = creator.create_target(argb8888(), width / 4, height / 4)?;
        if !overlay.set_alpha(0xc0) {
            warn!("Overlay alpha not supported, drawing it opaque");
        }

        let badge = {
            let mut surface = Surface::new(16, 16, argb8888())?;
            surface.fill(Color::RGBA(0xf0, 0xc0, 0x20, 0xff))?;
            creator.from_surface(&surface)?
        };

        let mut pixels = vec![0u32; width as usize * height as usize];

        self.wnd.open();
        let _watchdog = self.spawn_watchdog();

        let frame_time = self.config.frame_time();

        // Main loop
        while self.running && self.wnd.is_open() {
            let frame_start = Instant::now();

            let events: Vec<_> = self.event_pump.poll_iter().collect();
            for event in events.iter() {
                event.dispatch(self);
            }

            gradient(&mut pixels, width, height, self.frame);
            background.update(&pixels)?;

            {
                let pulse = (self.frame % 256) as u8;
                let mut target = self.wnd.renderer_mut().bind_target(&mut overlay)?;
                target.set_color(Color::RGBA(0x10, 0x10, pulse, 0xff));
                target.fill()?;
                target.copy(&badge)?;
            }

            self.wnd.clear();
            self.wnd.renderer_mut().copy(&background)?;
            self.wnd.renderer_mut().copy(&overlay)?;
            self.wnd.present();

            self.frame = self.frame.wrapping_add(1);

            // Frame timing
            let elapsed = frame_start.elapsed();
            if elapsed < frame_time {
                thread::sleep(frame_time - elapsed);
            }
        }

        info!("Leaving after {} frames", self.frame);

        Ok(())
    }

    fn spawn_watchdog(&self) -> Option<JoinHandle<()>> {
        let after = self.config.auto_close?;
        let registry = Arc::clone(self.ctx.registry());
        let id = self.wnd.id();

        Some(thread::spawn(move || watchdog(registry, id, after)))
    }
}

/// Ask the window to close once `after` has passed. Only touches the registry, never SDL.
fn watchdog(registry: Arc<WindowRegistry>, id: WindowId, after: Duration) {
    thread::sleep(after);

    match registry.get(id) {
        Some(state) => {
            info!("Closing window {} after {:?}", id, after);
            state.request_close();
        }
        None => debug!("Window {} already gone", id),
    }
}

/// Fill `pixels` with a diagonal ARGB gradient that scrolls with `frame`
fn gradient(pixels: &mut [u32], width: u32, height: u32, frame: u32) {
    let (width, height) = (width.max(1), height.max(1));

    for (i, px) in pixels.iter_mut().enumerate() {
        let x = i as u32 % width;
        let y = i as u32 / width;

        let r = (x * 255 / width).wrapping_add(frame) & 0xff;
        let g = (y * 255 / height) & 0xff;
        let b = 0x80;

        *px = 0xff00_0000 | r << 16 | g << 8 | b;
    }
}

impl Observer for App {
    fn on_quit(&mut self, _event: &Quit) {
        info!("Quit requested");
        self.running = false;
    }

    fn on_key(&mut self, event: &Key) {
        if !event.is_down() && event.keycode == SDLK_ESCAPE.0 as u32 {
            self.wnd.close();
        }
    }

    fn on_mouse_button(&mut self, event: &MouseButtonEvent) {
        if event.action == ButtonAction::Down {
            let (x, y) = event.position();
            info!("You clicked at ({}, {})", x, y);
        }
    }

    fn on_mouse_wheel(&mut self, event: &MouseWheel) {
        debug!("Scrolled ({}, {})", event.scroll_x(), event.scroll_y());
    }

    fn on_window(&mut self, event: &WindowEvent) {
        debug!("Window {} {:?}", event.window_id, event.action);
    }
}
