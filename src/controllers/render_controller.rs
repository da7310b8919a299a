use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::controllers::engine_set::EngineSet;
use crate::controllers::ports::file_presenter::ImageFilePresenterPort;
use crate::controllers::ports::video_encoder::VideoEncoderPort;
use crate::controllers::render_error::RenderError;
use crate::core::actions::adapt_viewport::adapt_viewport::adapt_viewport;
use crate::core::actions::animate_zoom::animation_settings::AnimationSettings;
use crate::core::actions::animate_zoom::frame_layout::{ANIMATION_DIRECTORY, frame_spec};
use crate::core::actions::animate_zoom::zoom_trajectory::ZoomTrajectory;
use crate::core::actions::compose_matrix::tile_layout::tile_parameters;
use crate::core::actions::generate_pixel_buffer::generate_pixel_buffer::generate_pixel_buffer;
use crate::core::data::calculation_information::CalculationInformation;
use crate::core::data::pixel_buffer::DEFAULT_ROW_ALIGNMENT;
use crate::core::data::render_params::RenderParameters;
use crate::core::fractals::mandelbrot::colour_map::MandelbrotColourMapKind;
use crate::core::fractals::mandelbrot::colour_maps::factory::mandelbrot_colour_map_factory;

pub const MATRIX_METHOD_NAME: &str = "RenderMatrix";
pub const ANIMATION_METHOD_NAME: &str = "RenderAnimation";

/// Timing of a composite render: the aggregate record and one record per
/// tile or frame, in render order.
pub type CompositeTiming = (CalculationInformation, Vec<CalculationInformation>);

/// Drives the compute, colour and write pipeline for single images, tile
/// matrices and zoom animations.
pub struct RenderController<P: ImageFilePresenterPort> {
    presenter: P,
    engines: EngineSet,
    colour_map: MandelbrotColourMapKind,
    row_alignment: usize,
}

impl<P: ImageFilePresenterPort> RenderController<P> {
    pub fn new(presenter: P, engines: EngineSet) -> Self {
        Self {
            presenter,
            engines,
            colour_map: MandelbrotColourMapKind::default(),
            row_alignment: DEFAULT_ROW_ALIGNMENT,
        }
    }

    #[must_use]
    pub fn with_colour_map(mut self, colour_map: MandelbrotColourMapKind) -> Self {
        self.colour_map = colour_map;
        self
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    #[must_use]
    pub fn engines(&self) -> &EngineSet {
        &self.engines
    }

    #[must_use]
    pub fn colour_map(&self) -> MandelbrotColourMapKind {
        self.colour_map
    }

    /// Renders one image after fitting the viewport to the raster aspect.
    pub fn render_single(&self, params: &RenderParameters) -> Result<CalculationInformation, RenderError> {
        let params = aspect_corrected(params);
        info!(
            "Rendering {} with {} ({} iterations)",
            params.resolution(),
            params.method(),
            params.iterations()
        );

        let timing = self.render_unit(&params)?;
        info!("{}", timing);
        Ok(timing)
    }

    /// Renders the aspect-corrected viewport as `dimension` x `dimension`
    /// tiles into the `Matrix` directory.
    pub fn render_matrix(
        &self,
        params: &RenderParameters,
        dimension: u32,
    ) -> Result<CompositeTiming, RenderError> {
        let base = aspect_corrected(params);
        let tiles = tile_parameters(&base, dimension)?;
        self.engines.select(base.method())?;

        info!(
            "Rendering {} as {}x{} tiles with {}",
            base.resolution(),
            dimension,
            dimension,
            base.method()
        );

        let mut aggregate = CalculationInformation::started(base.resolution(), MATRIX_METHOD_NAME);
        let mut units = Vec::with_capacity(tiles.len());

        for tile in &tiles {
            let timing = self.render_unit(&tile.params)?;
            debug!(
                "Tile {} ({}, {}) of {}: {}",
                tile.index,
                tile.column,
                tile.row,
                tiles.len(),
                timing
            );
            units.push(timing);
        }

        aggregate.mark_computed_from(&units)?;
        aggregate.finish()?;
        info!("{}", aggregate);

        Ok((aggregate, units))
    }

    /// Renders every frame of the zoom into the `Animation` directory and,
    /// when an encoder is given, assembles them into a video next to it.
    ///
    /// Every frame viewport is laid out before anything is rendered, so a zoom
    /// too deep for f64 fails without touching the output directory. With
    /// `clean_directory` set the frame directory is emptied first, and removed
    /// again once the video was written.
    pub fn render_animation(
        &self,
        params: &RenderParameters,
        settings: &AnimationSettings,
        encoder: Option<&dyn VideoEncoderPort>,
    ) -> Result<CompositeTiming, RenderError> {
        let base = aspect_corrected(params);
        let trajectory = ZoomTrajectory::new(
            base.viewport(),
            settings.end_focus(),
            settings.end_zoom(),
            settings.frame_count(),
        )?;
        let specs = (0..trajectory.frame_count())
            .map(|frame| frame_spec(&base, &trajectory, frame))
            .collect::<Result<Vec<_>, _>>()?;
        self.engines.select(base.method())?;

        let frame_directory = base.output().directory().join(ANIMATION_DIRECTORY);
        if settings.clean_directory() {
            remove_directory(&frame_directory)?;
        }

        info!(
            "Rendering {} frames at {} from zoom {:e} to {:e}",
            trajectory.frame_count(),
            base.resolution(),
            trajectory.start_zoom(),
            settings.end_zoom()
        );

        let mut aggregate = CalculationInformation::started(base.resolution(), ANIMATION_METHOD_NAME);
        let mut units = Vec::with_capacity(specs.len());
        let mut frames: Vec<PathBuf> = Vec::with_capacity(specs.len());

        for spec in &specs {
            let timing = self.render_unit(&spec.params)?;
            debug!(
                "Frame {} of {} at zoom {:e}: {}",
                spec.index + 1,
                specs.len(),
                spec.zoom,
                timing
            );
            frames.push(spec.params.file_path());
            units.push(timing);
        }

        aggregate.mark_computed_from(&units)?;

        if let Some(encoder) = encoder {
            let video = base
                .output()
                .directory()
                .join(settings.video_filename(base.resolution()));
            encoder.encode(&frames, settings.fps(), &video)?;
            info!("Video written to {}", video.display());

            if settings.clean_directory() {
                remove_directory(&frame_directory)?;
            }
        }

        aggregate.finish()?;
        info!("{}", aggregate);

        Ok((aggregate, units))
    }

    fn render_unit(&self, params: &RenderParameters) -> Result<CalculationInformation, RenderError> {
        let engine = self.engines.select(params.method())?;
        let resolution = params.resolution();
        let mut timing = CalculationInformation::started(resolution, engine.method().display_name());

        let grid = engine.compute(resolution, params.viewport(), params.iterations())?;
        timing.mark_computed()?;

        let colour_map = mandelbrot_colour_map_factory(self.colour_map, params.iterations());
        let pixels = generate_pixel_buffer(&grid, &colour_map, self.row_alignment)?;
        let path = params.file_path();
        self.presenter.present(&pixels, &path)?;
        timing.finish()?;

        debug!("Wrote {}", path.display());
        Ok(timing)
    }
}

fn aspect_corrected(params: &RenderParameters) -> RenderParameters {
    params.with_viewport(adapt_viewport(params.resolution(), params.viewport()))
}

fn remove_directory(directory: &Path) -> io::Result<()> {
    match fs::remove_dir_all(directory) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        result => result,
    }
}
