//! Interactive scatter viewer window
//!
//! Hosts a [`ScatterWidget`] in a winit window backed by wgpu, translating
//! window events into [`ViewerEvent`]s and driving the animation timer.

use std::sync::Arc;
use std::time::Duration;

use instant::Instant;
use winit::{
    dpi::{LogicalSize, PhysicalPosition},
    event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use scatterview_core::{ColumnSelection, Dataset, Error, Result, ViewerConfig};
use scatterview_gpu::{RenderBackend, WgpuBackend};

use crate::event::ViewerEvent;
use crate::picker::{ColumnPicker, ComponentPicker};
use crate::widget::ScatterWidget;

/// Pixel scroll distance equivalent to one wheel line
const PIXELS_PER_LINE: f64 = 100.0;

/// Standalone window showing one dataset
pub struct InteractiveViewer {
    config: ViewerConfig,
    title: String,
    dataset: Option<Box<dyn Dataset>>,
    selection: Option<ColumnSelection>,
}

impl InteractiveViewer {
    /// Create a new interactive viewer
    pub fn new(config: ViewerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            title: "scatterview".to_string(),
            dataset: None,
            selection: None,
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Dataset shown when the window opens
    pub fn set_dataset(&mut self, dataset: Box<dyn Dataset>) {
        self.dataset = Some(dataset);
    }

    /// Column selection applied after the dataset is attached
    pub fn set_columns(&mut self, selection: ColumnSelection) {
        self.selection = Some(selection);
    }

    /// Open the window and run until it is closed
    pub fn run(self) -> Result<()> {
        let event_loop = EventLoop::new()
            .map_err(|e| Error::Visualization(format!("Failed to create event loop: {}", e)))?;
        let [width, height] = self.config.canvas_size;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(&self.title)
                .with_inner_size(LogicalSize::new(width as f64, height as f64))
                .build(&event_loop)
                .map_err(|e| Error::Visualization(format!("Failed to create window: {}", e)))?,
        );

        let size = window.inner_size();
        let backend = pollster::block_on(WgpuBackend::new(
            window.clone(),
            size.width,
            size.height,
            self.config.enable_depth_test,
        ))?;
        let mut widget = ScatterWidget::new(backend, ColumnPicker::new(), self.config.clone())?;
        widget.update(ViewerEvent::Resize {
            width: size.width,
            height: size.height,
        })?;

        // Select before attaching so the dataset is bound once.
        if let Some(selection) = self.selection {
            widget.picker_mut().select(selection);
        }
        if let Some(dataset) = self.dataset {
            if let Err(e) = widget.set_data(Some(dataset)) {
                log::warn!("initial dataset not shown: {}", e);
            }
        }

        log::info!("viewer window open ({}x{})", size.width, size.height);

        let tick = Duration::from_secs_f32(self.config.timer_interval());
        let mut last_tick = Instant::now();
        let mut next_tick = last_tick + tick;
        let mut cursor = PhysicalPosition::new(0.0, 0.0);
        let mut left_pressed = false;

        event_loop
            .run(move |event, target| match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        widget.dispose();
                        target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        dispatch(
                            &mut widget,
                            ViewerEvent::Resize {
                                width: new_size.width,
                                height: new_size.height,
                            },
                        );
                    }
                    WindowEvent::MouseInput {
                        state,
                        button: MouseButton::Left,
                        ..
                    } => {
                        left_pressed = state == ElementState::Pressed;
                        let event = if left_pressed {
                            ViewerEvent::DragStart {
                                x: cursor.x as f32,
                                y: cursor.y as f32,
                            }
                        } else {
                            ViewerEvent::DragEnd
                        };
                        dispatch(&mut widget, event);
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        cursor = position;
                        if left_pressed {
                            dispatch(
                                &mut widget,
                                ViewerEvent::DragMove {
                                    x: position.x as f32,
                                    y: position.y as f32,
                                },
                            );
                        }
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        let delta = match delta {
                            MouseScrollDelta::LineDelta(_, y) => y,
                            MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
                        };
                        dispatch(&mut widget, ViewerEvent::Scroll { delta });
                    }
                    WindowEvent::RedrawRequested => {
                        dispatch(&mut widget, ViewerEvent::Draw);
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    let now = Instant::now();
                    if widget.is_timer_active() && now >= next_tick {
                        let dt = now.duration_since(last_tick).as_secs_f32();
                        dispatch(&mut widget, ViewerEvent::Timer { dt });
                        last_tick = now;
                        next_tick = now + tick;
                    }
                    if widget.take_redraw_request() {
                        window.request_redraw();
                    }
                    if widget.is_timer_active() {
                        target.set_control_flow(ControlFlow::WaitUntil(next_tick));
                    } else {
                        target.set_control_flow(ControlFlow::Wait);
                    }
                }
                _ => {}
            })
            .map_err(|e| Error::Visualization(format!("Event loop error: {}", e)))
    }
}

/// Forward `event` unless the widget is already disposed; returns whether it was delivered
fn dispatch<B: RenderBackend, P: ComponentPicker>(
    widget: &mut ScatterWidget<B, P>,
    event: ViewerEvent,
) -> bool {
    if widget.is_disposed() {
        log::debug!("dropping {:?} after dispose", event);
        return false;
    }
    if let Err(e) = widget.update(event) {
        log::error!("{:?} failed: {}", event, e);
    }
    true
}
