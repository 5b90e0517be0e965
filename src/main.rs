extern crate gfx_core;
extern crate env_logger;
extern crate piston_window;
#[macro_use] extern crate log;
#[macro_use] extern crate clap;
#[cfg(test)] extern crate tempfile;

use std::{io, process};
use std::path::PathBuf;

use clap::Arg;
use piston_window::{
    OpenGL,
    PistonWindow,
    WindowSettings,
    TextureSettings,
    Glyphs,
    Event,
    Input,
    Button,
    ButtonArgs,
    ButtonState,
    Motion,
    Key,
};

mod common;
mod reader;
mod plot;
mod view;
mod render;

use common::{Point, Segment};
use reader::ReadError;
use plot::Plot;
use view::Viewport;

fn main() {
    env_logger::init();
    match run() {
        Ok(()) =>
            info!("graceful shutdown"),
        Err(e) => {
            error!("fatal error: {:?}", e);
            process::exit(1);
        },
    }
}

#[derive(Debug)]
enum Error {
    MissingParameter(&'static str),
    ReadSegments(ReadError),
    ReadPoints(ReadError),
    Piston(PistonError),
}

#[derive(Debug)]
enum PistonError {
    BuildWindow(String),
    LoadFont { file: String, error: io::Error, },
    DrawText(gfx_core::factory::CombinedError),
}

const SCREEN_WIDTH: u32 = 800;
const SCREEN_HEIGHT: u32 = 640;
const ZOOM_STEP: f64 = 1.25;

fn run() -> Result<(), Error> {
    let matches = app_from_crate!()
        .arg(Arg::with_name("segments")
             .short("s")
             .long("segments")
             .value_name("FILE")
             .help("Segments file: a count line followed by `x1 y1 x2 y2` lines")
             .default_value("in.txt")
             .takes_value(true))
        .arg(Arg::with_name("points")
             .short("p")
             .long("points")
             .value_name("FILE")
             .help("Intersection points file: one `x y` per line")
             .default_value("out.txt")
             .takes_value(true))
        .arg(Arg::with_name("assets-dir")
             .short("a")
             .long("assets-dir")
             .value_name("DIR")
             .help("Graphics resources directory")
             .default_value("./assets")
             .takes_value(true))
        .get_matches();

    let segments_file = matches.value_of("segments")
        .ok_or(Error::MissingParameter("segments"))?;
    let points_file = matches.value_of("points")
        .ok_or(Error::MissingParameter("points"))?;
    let assets_dir = matches.value_of("assets-dir")
        .ok_or(Error::MissingParameter("assets-dir"))?;

    let inputs = Inputs {
        segments: PathBuf::from(segments_file),
        points: PathBuf::from(points_file),
    };
    let mut env = Env::new(inputs)?;

    let opengl = OpenGL::V3_2;
    let mut window: PistonWindow = WindowSettings::new(plot::TITLE, [SCREEN_WIDTH, SCREEN_HEIGHT])
        .exit_on_esc(true)
        .opengl(opengl)
        .build()
        .map_err(PistonError::BuildWindow)
        .map_err(Error::Piston)?;

    let mut font_path = PathBuf::from(assets_dir);
    font_path.push("FiraSans-Regular.ttf");
    let mut glyphs = Glyphs::new(&font_path, window.factory.clone(), TextureSettings::new())
        .map_err(|e| Error::Piston(PistonError::LoadFont {
            file: font_path.to_string_lossy().to_string(),
            error: e,
        }))?;

    while let Some(event) = window.next() {
        let maybe_result = window.draw_2d(&event, |context, g2d| {
            render::draw_plot(
                &env.plot,
                &env.viewport(),
                env.window,
                &env.info_line(),
                &mut glyphs,
                context,
                g2d,
            ).map_err(PistonError::DrawText)
        });
        if let Some(result) = maybe_result {
            let () = result.map_err(Error::Piston)?;
        }

        match event {
            Event::Input(Input::Button(ButtonArgs { button: Button::Keyboard(Key::Q), state: ButtonState::Release, .. })) =>
                break,
            Event::Input(Input::Button(ButtonArgs { button: Button::Keyboard(Key::C), state: ButtonState::Release, .. })) =>
                env.reset_zoom(),
            Event::Input(Input::Button(ButtonArgs { button: Button::Keyboard(Key::R), state: ButtonState::Release, .. })) =>
                env.reload(),
            Event::Input(Input::Move(Motion::MouseScroll(_, dy))) =>
                env.zoom_by(dy),
            Event::Input(Input::Resize(width, height)) =>
                env.resize(width, height),
            _ =>
                (),
        }
    }

    Ok(())
}

struct Inputs {
    segments: PathBuf,
    points: PathBuf,
}

impl Inputs {
    fn load(&self) -> Result<(Vec<Segment>, Vec<Point>), Error> {
        let segments = reader::read_segments(&self.segments)
            .map_err(Error::ReadSegments)?;
        let points = reader::read_points(&self.points)
            .map_err(Error::ReadPoints)?;
        info!(
            "loaded {} segments from {:?} and {} points from {:?}",
            segments.len(), self.segments, points.len(), self.points,
        );
        Ok((segments, points))
    }
}

struct Env {
    inputs: Inputs,
    plot: Plot,
    segments_count: usize,
    points_count: usize,
    zoom: f64,
    window: [f64; 2],
}

impl Env {
    fn new(inputs: Inputs) -> Result<Env, Error> {
        let (segments, points) = inputs.load()?;
        Ok(Env {
            plot: Plot::new(&segments, &points),
            segments_count: segments.len(),
            points_count: points.len(),
            inputs,
            zoom: 1.,
            window: [SCREEN_WIDTH as f64, SCREEN_HEIGHT as f64],
        })
    }

    fn viewport(&self) -> Viewport {
        Viewport::fit(&self.plot.bounds, render::plot_frame(self.window), self.zoom)
    }

    fn info_line(&self) -> String {
        format!(
            "[ {} segments, {} points ] <R> to reload, wheel to zoom, <C> to reset zoom or <Q> to exit",
            self.segments_count,
            self.points_count,
        )
    }

    fn reload(&mut self) {
        match self.inputs.load() {
            Ok((segments, points)) => {
                self.plot = Plot::new(&segments, &points);
                self.segments_count = segments.len();
                self.points_count = points.len();
            },
            Err(e) =>
                warn!("reload failed, keeping previous plot: {:?}", e),
        }
    }

    fn zoom_by(&mut self, ticks: f64) {
        self.zoom = view::clamp_zoom(self.zoom * ZOOM_STEP.powf(ticks));
        debug!("zoom set to {}", self.zoom);
    }

    fn reset_zoom(&mut self) {
        self.zoom = 1.;
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.window = [width as f64, height as f64];
    }
}
