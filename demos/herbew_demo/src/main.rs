// Copyright 2026 the Herbew Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pins a solid-colour panel to a screen edge and logs the actions clicks
//! on it produce.
//!
//! Left click logs `primary-activate`. Right click logs `secondary-dismiss`
//! and exits. Logging follows `RUST_LOG` (default `info`).

use std::fs::File;
use std::os::fd::AsFd;
use std::os::unix::fs::FileExt;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use herbew_core::config::{Anchor, ExclusiveZone, Layer, Margins};
use herbew_wayland::{
    Action, ActionQueue, DrawHandler, DrawTarget, SurfaceConfig, SurfaceManager,
};
use rustix::event::{PollFd, PollFlags, poll};
use rustix::fs::{MemfdFlags, ftruncate, memfd_create};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wayland_client::protocol::{wl_buffer::WlBuffer, wl_shm};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LayerArg {
    Background,
    Bottom,
    Top,
    Overlay,
}

#[derive(Debug, Parser)]
#[command(about = "Pin a clickable panel to a screen edge")]
struct Args {
    /// Panel width in pixels, 0 to stretch between left and right.
    #[arg(long, default_value_t = 400)]
    width: u32,
    /// Panel height in pixels, 0 to stretch between top and bottom.
    #[arg(long, default_value_t = 60)]
    height: u32,
    /// Edges to anchor to.
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = [Edge::Top, Edge::Right]
    )]
    anchor: Vec<Edge>,
    /// Margin on every side.
    #[arg(long, default_value_t = 0)]
    margin: i32,
    /// Stacking layer.
    #[arg(long, value_enum, default_value_t = LayerArg::Top)]
    layer: LayerArg,
    /// Zero-based output ordinal; the compositor chooses when omitted.
    #[arg(long)]
    output: Option<u32>,
    /// Exclusive zone override; defaults to the panel height.
    #[arg(long, allow_negative_numbers = true)]
    exclusive_zone: Option<i32>,
    /// Layer-surface namespace.
    #[arg(long, default_value = herbew_core::config::DEFAULT_NAMESPACE)]
    namespace: String,
    /// Panel colour as `0xAARRGGBB`.
    #[arg(long, value_parser = parse_color, default_value = "0xff202020")]
    color: u32,
}

fn parse_color(value: &str) -> Result<u32, std::num::ParseIntError> {
    u32::from_str_radix(value.trim_start_matches("0x"), 16)
}

impl Args {
    fn config(&self) -> SurfaceConfig {
        let anchor = self.anchor.iter().fold(Anchor::empty(), |anchor, edge| {
            anchor
                | match edge {
                    Edge::Top => Anchor::TOP,
                    Edge::Bottom => Anchor::BOTTOM,
                    Edge::Left => Anchor::LEFT,
                    Edge::Right => Anchor::RIGHT,
                }
        });
        let layer = match self.layer {
            LayerArg::Background => Layer::Background,
            LayerArg::Bottom => Layer::Bottom,
            LayerArg::Top => Layer::Top,
            LayerArg::Overlay => Layer::Overlay,
        };
        let zone = self
            .exclusive_zone
            .map_or(ExclusiveZone::MatchHeight, ExclusiveZone::Fixed);

        SurfaceConfig::default()
            .with_size(self.width, self.height)
            .with_anchor(anchor)
            .with_margins(Margins::uniform(self.margin))
            .with_layer(layer)
            .with_exclusive_zone(zone)
            .with_output(self.output)
            .with_namespace(self.namespace.clone())
    }
}

/// Fills the surface with one colour, re-allocating when the size changes.
#[derive(Debug)]
struct Painter {
    color: u32,
    painted: Option<(WlBuffer, (u32, u32))>,
}

impl Painter {
    fn paint(&mut self, target: &DrawTarget<'_, ActionQueue>) -> anyhow::Result<()> {
        if self.painted.as_ref().is_some_and(|(_, size)| *size == target.size) {
            return Ok(());
        }
        let (width, height) = target.size;
        let stride = width.checked_mul(4).context("panel too wide")?;
        let len = stride.checked_mul(height).context("panel too large")?;

        let fd = memfd_create("herbew-panel", MemfdFlags::CLOEXEC).context("memfd_create")?;
        ftruncate(&fd, u64::from(len)).context("ftruncate")?;
        let file = File::from(fd);
        let pixels: Vec<u8> = (0..width * height)
            .flat_map(|_| self.color.to_ne_bytes())
            .collect();
        file.write_all_at(&pixels, 0).context("write pixels")?;

        let pool = target
            .shm
            .create_pool(file.as_fd(), i32::try_from(len)?, target.queue, ());
        let buffer = pool.create_buffer(
            0,
            i32::try_from(width)?,
            i32::try_from(height)?,
            i32::try_from(stride)?,
            wl_shm::Format::Argb8888,
            target.queue,
            (),
        );
        pool.destroy();

        target.surface.attach(Some(&buffer), 0, 0);
        target
            .surface
            .damage(0, 0, i32::try_from(width)?, i32::try_from(height)?);
        target.surface.commit();
        info!(width, height, "panel painted");

        if let Some((old, _)) = self.painted.replace((buffer, target.size)) {
            old.destroy();
        }
        Ok(())
    }
}

impl DrawHandler<ActionQueue> for Painter {
    fn draw(&mut self, target: &DrawTarget<'_, ActionQueue>) {
        if let Err(err) = self.paint(target) {
            warn!(%err, "painting failed");
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut manager = SurfaceManager::connect(args.config(), ActionQueue::default())
        .context("bringing up the panel")?;
    let mut painter = Painter {
        color: args.color,
        painted: None,
    };

    // The initial configure was consumed during setup, so paint once up front.
    let _ = manager.redraw(&mut painter);

    loop {
        manager.flush()?;
        {
            let backend = manager.connection().backend();
            let fd = backend.poll_fd();
            let mut fds = [PollFd::new(&fd, PollFlags::IN)];
            poll(&mut fds, None).context("polling the compositor socket")?;
        }
        manager.read_events()?;
        manager.dispatch(&mut painter)?;

        let mut dismissed = false;
        for action in manager.sink_mut().drain() {
            info!(action = action.as_str(), "user action");
            dismissed |= action == Action::SecondaryDismiss;
        }
        if dismissed {
            return Ok(());
        }
        if manager.is_closed() {
            info!("panel closed by the compositor");
            return Ok(());
        }
    }
}
