#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Vision Curse session.

mod args;
mod ascii;
mod autopilot;
mod config;
mod logging;
mod session;

use std::{cell::RefCell, io, rc::Rc};

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use vision_curse_core::WELCOME_BANNER;
use vision_curse_rendering::{Camera, Color, Presentation, RenderingBackend};

use crate::{
    args::CliArgs,
    ascii::AsciiBackend,
    config::SessionConfig,
    session::{Session, Summary},
};

/// Entry point for the Vision Curse command-line interface.
fn main() -> Result<()> {
    logging::init();

    let args = CliArgs::parse();
    let config = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    let config = args
        .apply_to(config)
        .validate()
        .context("invalid session configuration")?;

    let summary = Rc::new(RefCell::new(Summary::default()));
    let mut session = Session::new(&config, Rc::clone(&summary));
    let camera = Camera::new(Vec2::new(
        config.session.viewport_width,
        config.session.viewport_height,
    ))?;
    let presentation = Presentation::new(
        WELCOME_BANNER,
        Color::from_rgb_u8(5, 5, 8),
        session.initial_scene(camera),
    );

    let settings = &config.session;
    let backend = AsciiBackend::new(
        io::stdout().lock(),
        settings.ticks,
        settings.render_every,
        settings.ascii_columns,
        settings.ascii_rows,
    );
    backend.run(presentation, move |dt, input, scene| {
        session.step(dt, input, scene)
    })?;

    println!("{}", summary.borrow());
    Ok(())
}
