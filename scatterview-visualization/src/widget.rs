//! The embeddable scatter widget
//!
//! [`ScatterWidget`] ties together the orbit controller, the dataset binder and
//! the renderer. Hosts drive it synchronously through [`ScatterWidget::update`]
//! and attach data with [`ScatterWidget::set_data`] and
//! [`ScatterWidget::set_columns`].

use crate::controller::OrbitController;
use crate::event::ViewerEvent;
use crate::picker::ComponentPicker;
use crate::stats::FrameStats;
use scatterview_core::{
    ColumnSelection, ConfigError, Dataset, PointBuffer, PointDatasetBinder, Result, ViewerConfig,
};
use scatterview_gpu::{RenderBackend, Renderer, RendererState};

pub struct ScatterWidget<B: RenderBackend, P: ComponentPicker> {
    controller: OrbitController,
    binder: PointDatasetBinder,
    renderer: Renderer<B>,
    picker: P,
    dataset: Option<Box<dyn Dataset>>,
    buffer: Option<PointBuffer>,
    last_config_error: Option<ConfigError>,
    timer_active: bool,
    redraw_requested: bool,
    stats: FrameStats,
}

impl<B: RenderBackend, P: ComponentPicker> ScatterWidget<B, P> {
    /// Create the widget and compile its program.
    ///
    /// Fails if the configuration is invalid or the program does not compile;
    /// the widget must not be shown in that case.
    pub fn new(backend: B, picker: P, config: ViewerConfig) -> Result<Self> {
        config.validate()?;

        let mut renderer = Renderer::new(backend, &config);
        renderer.initialize()?;

        let binder = PointDatasetBinder::new()
            .with_foreground(config.foreground_color)
            .with_background_range(config.background_range);

        let mut widget = Self {
            controller: OrbitController::new(&config),
            binder,
            renderer,
            picker,
            dataset: None,
            buffer: None,
            last_config_error: None,
            timer_active: false,
            redraw_requested: false,
            stats: FrameStats::new(),
        };
        widget.sync_camera();
        Ok(widget)
    }

    /// Dispatch one host event
    pub fn update(&mut self, event: ViewerEvent) -> Result<()> {
        match event {
            ViewerEvent::DragStart { x, y } => self.controller.on_drag_start(x, y),
            ViewerEvent::DragMove { x, y } => {
                if self.controller.on_drag_move(x, y) {
                    self.sync_camera();
                    self.redraw_requested = true;
                }
            }
            ViewerEvent::DragEnd => self.controller.on_drag_end(),
            ViewerEvent::Scroll { delta } => {
                if self.controller.on_scroll(delta) {
                    self.sync_camera();
                    self.redraw_requested = true;
                }
            }
            ViewerEvent::Timer { dt } => {
                if self.timer_active && self.controller.on_timer_tick(dt) {
                    self.sync_camera();
                    self.redraw_requested = true;
                }
            }
            ViewerEvent::Resize { width, height } => {
                self.renderer.resize(width, height);
                if self.controller.on_resize(width, height) {
                    self.sync_camera();
                    self.redraw_requested = true;
                }
            }
            ViewerEvent::Draw => {
                self.redraw_requested = false;
                self.renderer.draw()?;
                self.stats.record_frame();
            }
        }
        Ok(())
    }

    fn sync_camera(&mut self) {
        let camera = self.controller.camera();
        let matrices = *camera.matrices();
        let scale = camera.point_scale();
        self.renderer.set_model(&matrices.model);
        self.renderer.set_view(&matrices.view);
        self.renderer.set_projection(&matrices.projection);
        self.renderer.set_point_scale(scale);
    }

    /// Attach or detach the dataset.
    ///
    /// Attaching forwards the dataset's labels to the picker and rebinds with
    /// the picker's selection. Detaching keeps the last buffer on screen.
    pub fn set_data(&mut self, dataset: Option<Box<dyn Dataset>>) -> Result<()> {
        match dataset {
            Some(dataset) => {
                let labels = dataset.component_labels();
                log::info!("attached dataset '{}' with {} columns", dataset.id(), labels.len());
                self.picker.set_valid_components(&labels);
                self.dataset = Some(dataset);
                self.refresh()
            }
            None => {
                self.dataset = None;
                Ok(())
            }
        }
    }

    /// Change the four column selections and rebind
    pub fn set_columns(&mut self, selection: ColumnSelection) -> Result<()> {
        self.picker.select(selection);
        self.refresh()
    }

    /// Rebind the current dataset with the picker's selection.
    ///
    /// On failure the previously bound points stay on screen.
    pub fn refresh(&mut self) -> Result<()> {
        let buffer = match self.build_buffer() {
            Ok(buffer) => buffer,
            Err(e) => {
                log::warn!("keeping previous points: {}", e);
                self.last_config_error = Some(e.clone());
                return Err(e.into());
            }
        };

        self.renderer.bind_points(&buffer.records)?;
        self.sync_camera();
        self.buffer = Some(buffer);
        self.last_config_error = None;
        self.timer_active = true;
        self.redraw_requested = true;
        Ok(())
    }

    fn build_buffer(&mut self) -> std::result::Result<PointBuffer, ConfigError> {
        let dataset = self.dataset.as_deref().ok_or(ConfigError::NoDataset)?;
        let selection = self
            .picker
            .current_selection()
            .ok_or(ConfigError::NoSelection)?;
        self.binder.bind(dataset, &selection)
    }

    /// Auto-rotation speeds in degrees per tick
    pub fn set_rotation_speed(&mut self, azimuth: f32, elevation: f32) {
        self.controller.set_rotation_speed(azimuth, elevation);
    }

    pub fn start_timer(&mut self) {
        self.timer_active = true;
    }

    /// Deactivate the animation timer; ticks are ignored until restarted
    pub fn stop_timer(&mut self) {
        self.timer_active = false;
    }

    pub fn is_timer_active(&self) -> bool {
        self.timer_active
    }

    /// Whether a redraw was requested since the last call; clears the request
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    pub fn controller(&self) -> &OrbitController {
        &self.controller
    }

    pub fn renderer(&self) -> &Renderer<B> {
        &self.renderer
    }

    pub fn picker(&self) -> &P {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut P {
        &mut self.picker
    }

    /// The currently bound point buffer
    pub fn buffer(&self) -> Option<&PointBuffer> {
        self.buffer.as_ref()
    }

    /// The configuration error from the most recent failed bind, if any
    pub fn last_config_error(&self) -> Option<&ConfigError> {
        self.last_config_error.as_ref()
    }

    pub fn frame_stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn is_disposed(&self) -> bool {
        self.renderer.state() == RendererState::Disposed
    }

    /// Release GPU resources and stop the timer
    pub fn dispose(&mut self) {
        self.timer_active = false;
        self.renderer.dispose();
    }
}
