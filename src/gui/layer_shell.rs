//! Wayland layer-shell tracker overlays
//!
//! Uses smithay-client-toolkit to create one layer-shell surface per border
//! strip. Surfaces:
//! - Render on the overlay layer (always on top)
//! - Have no keyboard interactivity (never take focus)
//! - Don't appear in the taskbar
//! - Are placed at the strip geometry relative to the output origin
//!
//! The Wayland connection lives on its own thread. The factory talks to it
//! through a command queue; the thread reports readiness and compositor
//! closes through each overlay's notifier.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};

use smithay_client_toolkit::{
    compositor::{CompositorHandler, CompositorState},
    delegate_compositor, delegate_layer, delegate_output, delegate_registry, delegate_shm,
    output::{OutputHandler, OutputState},
    registry::{ProvidesRegistryState, RegistryState},
    registry_handlers,
    shell::{
        wlr_layer::{
            Anchor, KeyboardInteractivity, Layer, LayerShell, LayerShellHandler, LayerSurface,
            LayerSurfaceConfigure,
        },
        WaylandSurface,
    },
    shm::{
        slot::{Buffer, SlotPool},
        Shm, ShmHandler,
    },
};
use tiny_skia::{Color, FilterQuality, Pixmap, PixmapPaint, Transform};
use wayland_client::{
    globals::registry_queue_init,
    protocol::{wl_output, wl_shm, wl_surface},
    Connection, QueueHandle,
};

use crate::application::ports::{
    OverlayError, OverlayId, OverlayNotifier, OverlaySpec, OverlayWindow, OverlayWindowFactory,
};

/// Initial shared-memory pool size; grows on demand
const INITIAL_POOL_BYTES: usize = 1920 * 5 * 4;

/// Poll timeout between command checks
const POLL_TIMEOUT_MS: u16 = 50;

/// Strip color used when the asset cannot be loaded
fn fallback_color() -> Color {
    Color::from_rgba8(220, 50, 50, 255)
}

/// Error type for the layer-shell backend
#[derive(Debug, thiserror::Error)]
pub enum LayerShellError {
    #[error("Failed to connect to Wayland: {0}")]
    Connection(#[from] wayland_client::ConnectError),
    #[error("Failed to initialize registry: {0}")]
    Registry(#[from] wayland_client::globals::GlobalError),
    #[error("Layer shell not available (compositor doesn't support wlr-layer-shell)")]
    LayerShellNotAvailable,
    #[error("Wayland dispatch error: {0}")]
    Dispatch(#[from] wayland_client::DispatchError),
    #[error("Wayland error: {0}")]
    Wayland(#[from] wayland_client::backend::WaylandError),
    #[error("Failed to create buffer pool: {0}")]
    BufferPool(String),
    #[error("Wayland thread failed to start: {0}")]
    Startup(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Load the strip asset, or `None` when it is missing or not a PNG
pub fn load_asset(path: &Path) -> Option<Pixmap> {
    match Pixmap::load_png(path) {
        Ok(pixmap) => Some(pixmap),
        Err(e) => {
            tracing::warn!(
                asset = %path.display(),
                error = %e,
                "Strip asset unavailable, drawing solid strips"
            );
            None
        }
    }
}

/// Render one strip of `width`x`height`, stretching `asset` to fit.
///
/// Returns `None` for a zero-sized strip.
pub fn render_strip(width: u32, height: u32, asset: Option<&Pixmap>) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(width, height)?;
    match asset {
        Some(asset) => {
            pixmap.fill(Color::TRANSPARENT);
            let scale = Transform::from_scale(
                width as f32 / asset.width() as f32,
                height as f32 / asset.height() as f32,
            );
            let paint = PixmapPaint {
                quality: FilterQuality::Bilinear,
                ..PixmapPaint::default()
            };
            pixmap.draw_pixmap(0, 0, asset.as_ref(), &paint, scale, None);
        }
        None => pixmap.fill(fallback_color()),
    }
    Some(pixmap)
}

/// Copy tiny-skia RGBA pixels into a Wayland ARGB8888 buffer
fn copy_to_argb(src: &[u8], canvas: &mut [u8]) {
    for (dst, px) in canvas.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        // ARGB8888 is BGRA in memory on little-endian
        dst[0] = px[2];
        dst[1] = px[1];
        dst[2] = px[0];
        dst[3] = px[3];
    }
}

enum Command {
    Create {
        spec: OverlaySpec,
        notifier: OverlayNotifier,
        destroyed: Arc<AtomicBool>,
    },
    Show(OverlayId),
    Close(OverlayId),
}

/// Overlay factory that maps each tracker overlay to a layer-shell surface
pub struct LayerShellOverlayFactory {
    commands: mpsc::Sender<Command>,
}

impl LayerShellOverlayFactory {
    /// Connect to the compositor and start the Wayland thread.
    ///
    /// Returns Err if Wayland/layer-shell is not available (caller should
    /// fall back to another backend).
    pub fn spawn() -> Result<Self, LayerShellError> {
        let (commands, rx) = mpsc::channel();
        let (started_tx, started_rx) = mpsc::sync_channel::<Result<(), String>>(1);

        std::thread::Builder::new()
            .name("layer-shell".to_string())
            .spawn(move || {
                if let Err(e) = run_overlays(rx, &started_tx) {
                    // Only reaches the caller if startup never completed
                    let _ = started_tx.try_send(Err(e.to_string()));
                    tracing::error!(error = %e, "Layer-shell thread stopped");
                }
            })?;

        match started_rx.recv() {
            Ok(Ok(())) => Ok(Self { commands }),
            Ok(Err(message)) => Err(LayerShellError::Startup(message)),
            Err(_) => Err(LayerShellError::Startup(
                "thread exited before reporting".to_string(),
            )),
        }
    }
}

impl OverlayWindowFactory for LayerShellOverlayFactory {
    fn create(
        &self,
        spec: &OverlaySpec,
        notifier: OverlayNotifier,
    ) -> Result<Box<dyn OverlayWindow>, OverlayError> {
        let destroyed = Arc::new(AtomicBool::new(false));
        self.commands
            .send(Command::Create {
                spec: spec.clone(),
                notifier,
                destroyed: Arc::clone(&destroyed),
            })
            .map_err(|_| OverlayError::BackendUnavailable("layer-shell thread gone".to_string()))?;

        Ok(Box::new(LayerShellOverlay {
            id: spec.id,
            commands: self.commands.clone(),
            destroyed,
        }))
    }
}

/// Handle to one layer-shell surface owned by the Wayland thread
struct LayerShellOverlay {
    id: OverlayId,
    commands: mpsc::Sender<Command>,
    destroyed: Arc<AtomicBool>,
}

impl OverlayWindow for LayerShellOverlay {
    fn show_inactive(&mut self) -> Result<(), OverlayError> {
        if self.is_destroyed() {
            return Err(OverlayError::Destroyed);
        }
        self.commands
            .send(Command::Show(self.id))
            .map_err(|_| OverlayError::BackendUnavailable("layer-shell thread gone".to_string()))
    }

    fn close(&mut self) -> Result<(), OverlayError> {
        if self.destroyed.swap(true, Ordering::SeqCst) {
            return Err(OverlayError::Destroyed);
        }
        self.commands
            .send(Command::Close(self.id))
            .map_err(|_| OverlayError::BackendUnavailable("layer-shell thread gone".to_string()))
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }
}

/// Wayland thread body: runs until every factory handle is dropped
fn run_overlays(
    commands: mpsc::Receiver<Command>,
    started: &mpsc::SyncSender<Result<(), String>>,
) -> Result<(), LayerShellError> {
    let conn = Connection::connect_to_env()?;
    let (globals, mut event_queue) = registry_queue_init(&conn)?;
    let qh = event_queue.handle();

    let mut app = LayerShellOverlays::new(&globals, &qh, commands)?;

    // Initial roundtrip to get outputs
    event_queue.roundtrip(&mut app)?;
    let _ = started.try_send(Ok(()));

    while app.process_commands(&qh) {
        app.redraw_pending();

        // Dispatch Wayland events (blocking with timeout)
        event_queue.flush()?;
        if let Some(guard) = event_queue.prepare_read() {
            let fd = guard.connection_fd();
            let mut poll_fds = [nix::poll::PollFd::new(fd, nix::poll::PollFlags::POLLIN)];
            let _ = nix::poll::poll(&mut poll_fds, nix::poll::PollTimeout::from(POLL_TIMEOUT_MS));
            match guard.read() {
                Ok(_) => {}
                Err(wayland_client::backend::WaylandError::Io(ref io_err))
                    if io_err.kind() == std::io::ErrorKind::WouldBlock => {}
                Err(e) => return Err(LayerShellError::Wayland(e)),
            }
        }
        event_queue.dispatch_pending(&mut app)?;
    }

    tracing::debug!("Layer-shell thread exiting");
    Ok(())
}

/// One mapped or pending strip surface
struct StripSurface {
    spec: OverlaySpec,
    notifier: OverlayNotifier,
    destroyed: Arc<AtomicBool>,
    layer: LayerSurface,
    asset: Option<Pixmap>,
    width: u32,
    height: u32,
    configured: bool,
    visible: bool,
    dirty: bool,
    buffer: Option<Buffer>,
}

/// Layer shell overlay state
struct LayerShellOverlays {
    registry_state: RegistryState,
    output_state: OutputState,
    compositor_state: CompositorState,
    shm: Shm,
    layer_shell: LayerShell,
    pool: SlotPool,

    commands: mpsc::Receiver<Command>,
    surfaces: HashMap<OverlayId, StripSurface>,
}

impl LayerShellOverlays {
    fn new(
        globals: &wayland_client::globals::GlobalList,
        qh: &QueueHandle<Self>,
        commands: mpsc::Receiver<Command>,
    ) -> Result<Self, LayerShellError> {
        let registry_state = RegistryState::new(globals);
        let output_state = OutputState::new(globals, qh);
        let compositor_state = CompositorState::bind(globals, qh)
            .map_err(|_| LayerShellError::LayerShellNotAvailable)?;
        let shm = Shm::bind(globals, qh).map_err(|_| LayerShellError::LayerShellNotAvailable)?;
        let layer_shell =
            LayerShell::bind(globals, qh).map_err(|_| LayerShellError::LayerShellNotAvailable)?;

        let pool = SlotPool::new(INITIAL_POOL_BYTES, &shm)
            .map_err(|e| LayerShellError::BufferPool(e.to_string()))?;

        Ok(Self {
            registry_state,
            output_state,
            compositor_state,
            shm,
            layer_shell,
            pool,
            commands,
            surfaces: HashMap::new(),
        })
    }

    /// Apply queued commands.
    ///
    /// # Returns
    /// `false` once the factory and every overlay handle are gone
    fn process_commands(&mut self, qh: &QueueHandle<Self>) -> bool {
        loop {
            match self.commands.try_recv() {
                Ok(Command::Create {
                    spec,
                    notifier,
                    destroyed,
                }) => self.create_surface(qh, spec, notifier, destroyed),
                Ok(Command::Show(id)) => {
                    if let Some(surface) = self.surfaces.get_mut(&id) {
                        surface.visible = true;
                        surface.dirty = true;
                    }
                }
                Ok(Command::Close(id)) => {
                    // Dropping the LayerSurface destroys it
                    if self.surfaces.remove(&id).is_some() {
                        tracing::debug!(overlay = %id, "Layer surface closed");
                    }
                }
                Err(mpsc::TryRecvError::Empty) => return true,
                Err(mpsc::TryRecvError::Disconnected) => return false,
            }
        }
    }

    fn create_surface(
        &mut self,
        qh: &QueueHandle<Self>,
        spec: OverlaySpec,
        notifier: OverlayNotifier,
        destroyed: Arc<AtomicBool>,
    ) {
        let surface = self.compositor_state.create_surface(qh);
        let layer = if spec.options.always_on_top {
            Layer::Overlay
        } else {
            Layer::Top
        };

        let layer_surface = self.layer_shell.create_layer_surface(
            qh,
            surface,
            layer,
            Some(format!("share-indicator-{}", spec.position)),
            None, // Use default output
        );

        // Absolute placement from the output origin
        let geometry = spec.geometry;
        layer_surface.set_anchor(Anchor::TOP | Anchor::LEFT);
        layer_surface.set_margin(geometry.y, 0, 0, geometry.x);
        layer_surface.set_size(geometry.width, geometry.height);

        if !spec.options.focusable {
            layer_surface.set_keyboard_interactivity(KeyboardInteractivity::None);
        }

        // Don't push other surfaces aside
        layer_surface.set_exclusive_zone(-1);

        // Commit without a buffer so the compositor sends the first configure
        layer_surface.commit();

        let asset = load_asset(&spec.asset);
        tracing::debug!(
            overlay = %spec.id,
            position = %spec.position,
            geometry = %geometry,
            "Layer surface requested"
        );

        self.surfaces.insert(
            spec.id,
            StripSurface {
                width: geometry.width,
                height: geometry.height,
                spec,
                notifier,
                destroyed,
                layer: layer_surface,
                asset,
                configured: false,
                visible: false,
                dirty: false,
                buffer: None,
            },
        );
    }

    fn redraw_pending(&mut self) {
        let ids: Vec<OverlayId> = self
            .surfaces
            .iter()
            .filter(|(_, s)| s.configured && s.visible && s.dirty)
            .map(|(id, _)| *id)
            .collect();

        for id in ids {
            if let Err(e) = self.draw(id) {
                tracing::warn!(overlay = %id, error = %e, "Layer surface draw failed");
            }
        }
    }

    fn draw(&mut self, id: OverlayId) -> Result<(), LayerShellError> {
        let Some(surface) = self.surfaces.get_mut(&id) else {
            return Ok(());
        };
        surface.dirty = false;

        let Some(pixmap) = render_strip(surface.width, surface.height, surface.asset.as_ref())
        else {
            return Ok(());
        };

        let (buffer, canvas) = self
            .pool
            .create_buffer(
                surface.width as i32,
                surface.height as i32,
                (surface.width * 4) as i32,
                wl_shm::Format::Argb8888,
            )
            .map_err(|e| LayerShellError::BufferPool(e.to_string()))?;

        copy_to_argb(pixmap.data(), canvas);

        let wl_surface = surface.layer.wl_surface();
        buffer.attach_to(wl_surface).map_err(|e| {
            LayerShellError::BufferPool(format!("Failed to attach buffer: {}", e))
        })?;
        wl_surface.damage_buffer(0, 0, surface.width as i32, surface.height as i32);
        surface.layer.commit();

        // Keep the buffer alive while attached
        surface.buffer = Some(buffer);
        Ok(())
    }

    fn find_by_layer(&self, layer: &LayerSurface) -> Option<OverlayId> {
        self.surfaces
            .iter()
            .find(|(_, s)| s.layer.wl_surface() == layer.wl_surface())
            .map(|(id, _)| *id)
    }
}

// SCTK delegate implementations

impl CompositorHandler for LayerShellOverlays {
    fn scale_factor_changed(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _new_factor: i32,
    ) {
    }

    fn transform_changed(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _new_transform: wl_output::Transform,
    ) {
    }

    fn frame(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _time: u32,
    ) {
    }

    fn surface_enter(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _output: &wl_output::WlOutput,
    ) {
    }

    fn surface_leave(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _output: &wl_output::WlOutput,
    ) {
    }
}

impl OutputHandler for LayerShellOverlays {
    fn output_state(&mut self) -> &mut OutputState {
        &mut self.output_state
    }

    fn new_output(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _output: wl_output::WlOutput,
    ) {
    }

    fn update_output(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _output: wl_output::WlOutput,
    ) {
    }

    fn output_destroyed(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _output: wl_output::WlOutput,
    ) {
    }
}

impl LayerShellHandler for LayerShellOverlays {
    fn closed(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, layer: &LayerSurface) {
        let Some(id) = self.find_by_layer(layer) else {
            return;
        };
        if let Some(surface) = self.surfaces.remove(&id) {
            tracing::debug!(overlay = %id, "Layer surface closed by compositor");
            surface.destroyed.store(true, Ordering::SeqCst);
            surface.notifier.closed();
        }
    }

    fn configure(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        layer: &LayerSurface,
        configure: LayerSurfaceConfigure,
        _serial: u32,
    ) {
        let Some(id) = self.find_by_layer(layer) else {
            return;
        };
        let Some(surface) = self.surfaces.get_mut(&id) else {
            return;
        };

        let (width, height) = configure.new_size;
        if width > 0 && height > 0 {
            surface.width = width;
            surface.height = height;
        }
        surface.dirty = true;

        if !surface.configured {
            surface.configured = true;
            tracing::debug!(overlay = %id, position = %surface.spec.position, "Layer surface ready");
            surface.notifier.ready();
        }

        // Acknowledge the configure
        layer.wl_surface().commit();
    }
}

impl ShmHandler for LayerShellOverlays {
    fn shm_state(&mut self) -> &mut Shm {
        &mut self.shm
    }
}

impl ProvidesRegistryState for LayerShellOverlays {
    fn registry(&mut self) -> &mut RegistryState {
        &mut self.registry_state
    }

    registry_handlers![OutputState];
}

delegate_compositor!(LayerShellOverlays);
delegate_output!(LayerShellOverlays);
delegate_shm!(LayerShellOverlays);
delegate_layer!(LayerShellOverlays);
delegate_registry!(LayerShellOverlays);
