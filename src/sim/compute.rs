//! Compute step
//!
//! Owns the transition-kernel pipeline and the two ping-pong bind groups.
//! Each frame encodes exactly one compute pass that reads the source
//! texture (binding 0) and overwrites the destination (binding 1), one
//! invocation per cell.
//!
//! Thread-group sizing follows the hardware: the workgroup width comes
//! from the adapter's reported subgroup width, the height from dividing
//! the device's invocation budget by that width. WGSL fixes the workgroup
//! size at compile time, so the kernel source is a template instantiated
//! with the derived dimensions before the module is created.

use wgpu::Device;

use super::grid::{BufferSlot, GridBuffers};

/// Workgroup width used when the adapter does not report a subgroup size.
const FALLBACK_EXECUTION_WIDTH: u32 = 32;

/// Derives `(width, height)` thread-group dimensions from the hardware
/// execution width and the device limits.
///
/// `width * height` never exceeds `max_compute_invocations_per_workgroup`,
/// and each dimension respects its per-axis limit.
pub fn workgroup_extent(execution_width: u32, limits: &wgpu::Limits) -> (u32, u32) {
    let max_invocations = limits.max_compute_invocations_per_workgroup.max(1);

    let width = if execution_width == 0 {
        FALLBACK_EXECUTION_WIDTH
    } else {
        execution_width
    }
    .min(limits.max_compute_workgroup_size_x)
    .min(max_invocations)
    .max(1);

    let height = (max_invocations / width)
        .min(limits.max_compute_workgroup_size_y)
        .max(1);

    (width, height)
}

/// Number of workgroups needed to cover `grid`, rounding partial groups
/// up at the edges. The kernel bounds-checks the overshoot.
pub fn dispatch_extent(grid: (u32, u32), workgroup: (u32, u32)) -> (u32, u32) {
    (
        grid.0.div_ceil(workgroup.0),
        grid.1.div_ceil(workgroup.1),
    )
}

/// GPU resources for advancing the automaton one generation per frame.
pub struct LifeCompute {
    pipeline: wgpu::ComputePipeline,
    bind_group_a_to_b: wgpu::BindGroup,
    bind_group_b_to_a: wgpu::BindGroup,
    workgroups: (u32, u32),
}

impl LifeCompute {
    /// Compiles the transition kernel and builds both ping-pong bind
    /// groups against the grid textures.
    pub fn new(device: &Device, grid: &GridBuffers, workgroup: (u32, u32)) -> Self {
        let shader_source = include_str!("life.wgsl")
            .replace("{{WG_X}}", &workgroup.0.to_string())
            .replace("{{WG_Y}}", &workgroup.1.to_string());

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Life Compute Shader"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Life Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::StorageTexture {
                        access: wgpu::StorageTextureAccess::WriteOnly,
                        format: GridBuffers::FORMAT,
                        view_dimension: wgpu::TextureViewDimension::D2,
                    },
                    count: None,
                },
            ],
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Life Compute Pipeline"),
            layout: Some(
                &device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("Life Pipeline Layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    push_constant_ranges: &[],
                }),
            ),
            module: &shader,
            entry_point: Some("step"),
            compilation_options: Default::default(),
            cache: None,
        });

        let bind_group_for = |label, source, dest| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(grid.view(source)),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(grid.view(dest)),
                    },
                ],
            })
        };

        let bind_group_a_to_b = bind_group_for("Life Bind Group A->B", BufferSlot::A, BufferSlot::B);
        let bind_group_b_to_a = bind_group_for("Life Bind Group B->A", BufferSlot::B, BufferSlot::A);

        Self {
            pipeline,
            bind_group_a_to_b,
            bind_group_b_to_a,
            workgroups: dispatch_extent((grid.width, grid.height), workgroup),
        }
    }

    /// Encodes one transition pass reading `source` and writing the other
    /// texture. The destination's previous contents are fully overwritten;
    /// the source is left unmodified.
    pub fn encode(&self, encoder: &mut wgpu::CommandEncoder, source: BufferSlot) {
        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("Life Compute Pass"),
            timestamp_writes: None,
        });

        pass.set_pipeline(&self.pipeline);
        let bind_group = match source {
            BufferSlot::A => &self.bind_group_a_to_b,
            BufferSlot::B => &self.bind_group_b_to_a,
        };
        pass.set_bind_group(0, bind_group, &[]);
        pass.dispatch_workgroups(self.workgroups.0, self.workgroups.1, 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workgroup_fits_invocation_budget() {
        let limits = wgpu::Limits::default();
        let (width, height) = workgroup_extent(0, &limits);
        assert!(width * height <= limits.max_compute_invocations_per_workgroup);
        assert!(width >= 1 && height >= 1);
    }

    #[test]
    fn test_workgroup_uses_reported_width() {
        let limits = wgpu::Limits::default();
        let (width, height) = workgroup_extent(64, &limits);
        assert_eq!(width, 64);
        assert_eq!(width * height, limits.max_compute_invocations_per_workgroup);
    }

    #[test]
    fn test_workgroup_clamps_oversized_width() {
        let limits = wgpu::Limits::default();
        let (width, height) = workgroup_extent(1 << 20, &limits);
        assert!(width <= limits.max_compute_workgroup_size_x);
        assert!(width * height <= limits.max_compute_invocations_per_workgroup);
    }

    #[test]
    fn test_dispatch_covers_reference_grid() {
        let workgroup = workgroup_extent(0, &wgpu::Limits::default());
        let groups = dispatch_extent((1024, 1024), workgroup);
        assert!(groups.0 * workgroup.0 >= 1024);
        assert!(groups.1 * workgroup.1 >= 1024);
    }

    #[test]
    fn test_dispatch_rounds_partial_groups_up() {
        assert_eq!(dispatch_extent((100, 100), (32, 8)), (4, 13));
        assert_eq!(dispatch_extent((1024, 1024), (32, 8)), (32, 128));
    }
}
