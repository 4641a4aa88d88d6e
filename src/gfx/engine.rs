//! WGPU render engine for the Petri simulator
//!
//! Owns the surface, device and queue, the grid textures, and the two
//! pipelines (transition kernel and blit quad). Each frame encodes one
//! compute pass and one render pass into a single command buffer; queue
//! ordering on a single GPU timeline provides all the sequencing the
//! ping-pong scheme needs, so the host never waits on GPU completion.

use log::{info, trace};

use crate::error::Result;
use crate::sim::compute::workgroup_extent;
use crate::sim::{FrameDriver, GridBuffers, LifeCompute};

use super::presenter::Presenter;

/// Simulation grid dimensions, fixed at startup.
pub const GRID_WIDTH: u32 = 1024;
pub const GRID_HEIGHT: u32 = 1024;

/// Core engine managing GPU resources and the per-frame dispatch protocol.
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    grid: GridBuffers,
    life: LifeCompute,
    presenter: Presenter,
}

impl RenderEngine {
    /// Creates the engine for the given window: device setup, grid
    /// allocation, seeding of texture A, and both pipelines.
    ///
    /// Any failure here is a startup failure; nothing is retried.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        info!("GPU adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(surface_capabilities.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            // One frame per vsync tick drives the whole simulation clock.
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let grid = GridBuffers::create(&device, GRID_WIDTH, GRID_HEIGHT);
        // Frame 0 reads texture A, so that is where the seed goes. B stays
        // undefined until the first dispatch overwrites it.
        grid.upload(
            &queue,
            crate::sim::BufferSlot::A,
            &crate::sim::seed(GRID_WIDTH, GRID_HEIGHT),
        );

        let workgroup = workgroup_extent(adapter.limits().max_subgroup_size, &device.limits());
        info!(
            "grid {}x{}, workgroup {}x{}",
            GRID_WIDTH, GRID_HEIGHT, workgroup.0, workgroup.1
        );

        let life = LifeCompute::new(&device, &grid, workgroup);
        let presenter = Presenter::new(&device, format, &grid);

        Ok(RenderEngine {
            surface,
            device,
            queue,
            config,
            grid,
            life,
            presenter,
        })
    }

    /// Runs one frame: compute pass from this frame's source into its
    /// destination, then the blit of the selected display texture, both
    /// submitted as one command buffer, then present.
    ///
    /// On failure the frame is abandoned whole; the caller shuts down
    /// rather than retry, since a lost surface or device means the
    /// resources would have to be recreated from scratch.
    pub fn run_frame(&mut self, driver: &mut FrameDriver) -> Result<()> {
        let surface_texture = self.surface.get_current_texture()?;
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        let (source, _dest) = driver.source_and_dest();
        self.life.encode(&mut encoder, source);
        self.presenter.encode(&mut encoder, &surface_view, driver.display());

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();

        driver.complete_frame();
        trace!("frame {}", driver.frame());
        Ok(())
    }

    /// Resizes the window surface. The simulation grid never resizes;
    /// the quad and sampler scale it to whatever the window becomes.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// The grid texture pair, alive for the whole engine lifetime.
    pub fn grid(&self) -> &GridBuffers {
        &self.grid
    }
}
