//! Compositor: owns the scene and drives the overlay lifecycle.
//!
//! Phases are explicit: [`Compositor::new`] validates the configuration,
//! [`Compositor::start`] subscribes to host events and begins loading, and
//! [`Compositor::tick`] advances everything once per frame. Load completion
//! runs normalize, locate, frame and map exactly once; afterwards only the
//! visibility gate runs per frame, and mapping is redone on content resize.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};
use winit::dpi::PhysicalSize;
use crate::camera::{Camera, CameraFramer, OrbitControls};
use crate::config::CompositorConfig;
use crate::error::{Error, Result};
use crate::events::{HostEvent, HostEvents, Subscription};
use crate::loader::{LoadEvent, ModelLoader};
use crate::overlay::{
    ContentElement, ContentSize, MappingOutcome, ScreenSpaceMapper, VisibilityDecision, VisibilityGate,
};
use crate::overlay_bail;
use crate::placeholder::{build_placeholder, IdleAnimator, PlaceholderKind};
use crate::renderer::OverlayDraw;
use crate::scene::{ModelNode, NodeKey, SceneGraph};
use crate::surface::{LocatedSurface, ModelNormalizer, SurfaceDescriptor, SurfaceLocator};

const SOURCE: &str = "folio3d::Compositor";

/// Lifecycle phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositorState {
    /// Constructed, `start` not called yet
    Uninitialized,
    /// Waiting for the model loader
    Loading,
    /// Model in place, surface located, camera framed
    Ready,
    /// Load failed; a placeholder is shown instead
    Failed(String),
}

impl fmt::Display for CompositorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompositorState::Uninitialized => write!(f, "uninitialized"),
            CompositorState::Loading => write!(f, "loading"),
            CompositorState::Ready => write!(f, "ready"),
            CompositorState::Failed(reason) => write!(f, "failed ({})", reason),
        }
    }
}

/// Current overlay mapping.
#[derive(Debug, Clone, Copy)]
struct Mapping {
    surface: SurfaceDescriptor,
    outcome: MappingOutcome,
}

pub struct Compositor {
    config: CompositorConfig,
    state: CompositorState,

    graph: SceneGraph,
    camera: Camera,
    controls: OrbitControls,

    normalizer: ModelNormalizer,
    locator: SurfaceLocator,
    mapper: ScreenSpaceMapper,
    framer: CameraFramer,
    gate: VisibilityGate,

    // ===== loading =====
    loader: Option<Box<dyn ModelLoader>>,
    uri: String,
    loading_elapsed: f32,
    stall_reported: bool,

    // ===== loaded scene =====
    model: Option<NodeKey>,
    surface: Option<LocatedSurface>,
    placeholder: Option<(PlaceholderKind, IdleAnimator)>,

    // ===== overlay =====
    content: Option<Weak<RefCell<dyn ContentElement>>>,
    mapping: Option<Mapping>,
    occluder: Option<NodeKey>,
    presentation: Option<VisibilityDecision>,
    /// Last decision the content element accepted
    presented: Option<VisibilityDecision>,
    /// Transform of the current mapping not yet accepted by a busy element
    transform_pending: bool,

    // ===== host =====
    page_visible: bool,
    pending_output_size: Option<PhysicalSize<u32>>,
    inbox: Rc<RefCell<VecDeque<HostEvent>>>,
    subscription: Option<Subscription>,
    notices: Vec<Error>,
}

impl Compositor {
    /// Construct with a validated configuration. No side effects.
    pub fn new(config: CompositorConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            state: CompositorState::Uninitialized,
            graph: SceneGraph::new(),
            camera: Camera::from_config(&config),
            controls: OrbitControls::from_config(&config),
            normalizer: ModelNormalizer::new(config.target_size),
            locator: SurfaceLocator::new(config.surface_name_candidates.clone()),
            mapper: ScreenSpaceMapper::from_config(&config),
            framer: CameraFramer::from_config(&config),
            gate: VisibilityGate::from_config(&config),
            loader: None,
            uri: String::new(),
            loading_elapsed: 0.0,
            stall_reported: false,
            model: None,
            surface: None,
            placeholder: None,
            content: None,
            mapping: None,
            occluder: None,
            presentation: None,
            presented: None,
            transform_pending: false,
            page_visible: true,
            pending_output_size: None,
            inbox: Rc::new(RefCell::new(VecDeque::new())),
            subscription: None,
            notices: Vec::new(),
            config,
        })
    }

    /// Subscribe to `events` and begin loading `uri`.
    ///
    /// A loader that refuses to begin is handled like a failed load.
    ///
    /// # Errors
    ///
    /// `InvalidState` unless the compositor is still `Uninitialized`.
    pub fn start(&mut self, mut loader: Box<dyn ModelLoader>, uri: &str, events: &HostEvents) -> Result<()> {
        if self.state != CompositorState::Uninitialized {
            overlay_bail!(SOURCE, InvalidState, "start called while {}", self.state);
        }

        let inbox = Rc::clone(&self.inbox);
        self.subscription = Some(events.subscribe(move |event| inbox.borrow_mut().push_back(*event)));
        self.uri = uri.to_string();
        self.state = CompositorState::Loading;
        crate::overlay_info!(SOURCE, "loading model '{}'", uri);

        match loader.begin(uri) {
            Ok(()) => self.loader = Some(loader),
            Err(e) => self.fail_load(e.to_string()),
        }
        Ok(())
    }

    /// Release the host subscription and any in-flight load. The scene
    /// stays as it is.
    pub fn shutdown(&mut self) {
        if self.subscription.take().is_some() {
            crate::overlay_debug!(SOURCE, "released host event subscription");
        }
        self.loader = None;
        self.inbox.borrow_mut().clear();
    }

    // ===== CONTENT ELEMENT =====

    /// Attach the host's content element. The compositor keeps only a weak
    /// reference. Mapped immediately when the model is ready.
    pub fn attach_content(&mut self, content: Rc<RefCell<dyn ContentElement>>) {
        self.content = Some(Rc::downgrade(&content));
        self.presentation = None;
        self.presented = None;
        if self.state == CompositorState::Ready {
            self.map_logged();
        }
    }

    /// Forget the content element and its mapping.
    pub fn detach_content(&mut self) {
        self.content = None;
        self.mapping = None;
        self.presentation = None;
        self.presented = None;
    }

    pub fn has_content(&self) -> bool {
        self.live_content().is_some()
    }

    fn live_content(&self) -> Option<Rc<RefCell<dyn ContentElement>>> {
        self.content.as_ref().and_then(Weak::upgrade)
    }

    /// Recompute the overlay placement from the current surface and content
    /// size. Call after the content element was laid out again.
    ///
    /// # Errors
    ///
    /// `InvalidState` before the model is ready or while the host holds the
    /// element mutably, `MissingContentElement` when no live content
    /// element is attached.
    pub fn remap(&mut self) -> Result<MappingOutcome> {
        let Some(located) = self.surface.clone().filter(|_| self.state == CompositorState::Ready) else {
            overlay_bail!(SOURCE, InvalidState, "cannot map the overlay while {}", self.state);
        };
        let Some(content) = self.live_content() else {
            self.mapping = None;
            return Err(Error::MissingContentElement);
        };
        let Some(surface) = SurfaceDescriptor::compute(&self.graph, located.node, self.config.surface_local_normal)
        else {
            self.mapping = None;
            overlay_bail!(SOURCE, InvalidNode, "surface node {:?} cannot be measured", located.node);
        };

        let Ok(size) = content.try_borrow().map(|element| element.pixel_size()) else {
            return Err(Error::InvalidState("content element is mutably borrowed by the host".to_string()));
        };
        let outcome = self.mapper.map(&surface, size);
        if outcome.degenerate_content {
            self.notices.push(Error::DegenerateContentSize { width: size.width, height: size.height });
        }
        self.occluder = Some(self.mapper.upsert_occluder(&mut self.graph, self.occluder, &outcome.occluder)?);

        self.mapping = Some(Mapping { surface, outcome });
        self.transform_pending = true;
        self.deliver_transform(&content);
        self.presentation = None;
        self.presented = None;

        crate::overlay_debug!(
            SOURCE,
            "overlay mapped: {}x{} px, scale {:?}, position {:?}",
            size.width,
            size.height,
            outcome.placement.scale,
            outcome.placement.position
        );
        Ok(outcome)
    }

    /// Hand the current placement to `content`; stays pending while the
    /// element is borrowed elsewhere.
    fn deliver_transform(&mut self, content: &Rc<RefCell<dyn ContentElement>>) {
        let Some(mapping) = self.mapping.filter(|_| self.transform_pending) else { return };
        match content.try_borrow_mut() {
            Ok(mut element) => {
                element.apply_transform(mapping.outcome.placement.world_matrix());
                self.transform_pending = false;
            }
            Err(_) => crate::overlay_trace!(SOURCE, "content element busy; transform retried next tick"),
        }
    }

    /// `remap` for internal triggers: failures are logged, never returned.
    fn map_logged(&mut self) {
        match self.remap() {
            Ok(_) => {}
            Err(Error::MissingContentElement) => {
                crate::overlay_debug!(SOURCE, "no content element attached; overlay not mapped");
            }
            Err(e) => crate::overlay_warn!(SOURCE, "overlay mapping skipped: {}", e),
        }
    }

    // ===== HOST EVENTS =====

    /// Record a window resize: camera aspect now, renderer size on the
    /// next [`take_output_resize`](Self::take_output_resize). The overlay
    /// mapping is left alone.
    pub fn on_window_resized(&mut self, size: PhysicalSize<u32>) {
        self.camera.set_aspect(size.width as f32, size.height as f32);
        if size.width > 0 && size.height > 0 {
            self.pending_output_size = Some(size);
        }
    }

    /// The content element was laid out again.
    pub fn on_content_resized(&mut self) {
        if self.state == CompositorState::Ready {
            self.map_logged();
        }
    }

    pub fn on_visibility_changed(&mut self, visible: bool) {
        if self.page_visible != visible {
            crate::overlay_debug!(SOURCE, "page {}", if visible { "visible" } else { "hidden" });
        }
        self.page_visible = visible;
    }

    /// Output size the renderer should adopt, if the window changed since
    /// the last call.
    pub fn take_output_resize(&mut self) -> Option<PhysicalSize<u32>> {
        self.pending_output_size.take()
    }

    fn drain_events(&mut self) {
        loop {
            let Some(event) = self.inbox.borrow_mut().pop_front() else { break };
            match event {
                HostEvent::WindowResized(size) => self.on_window_resized(size),
                HostEvent::ContentResized => self.on_content_resized(),
                HostEvent::VisibilityChanged(visible) => self.on_visibility_changed(visible),
            }
        }
    }

    // ===== LOADING =====

    /// Apply one loader event. Ignored unless loading.
    pub fn handle_load_event(&mut self, event: LoadEvent) {
        if self.state != CompositorState::Loading {
            return;
        }
        match event {
            LoadEvent::Progress { loaded, total } => match total {
                Some(total) => crate::overlay_trace!(SOURCE, "loading {}/{}", loaded, total),
                None => crate::overlay_trace!(SOURCE, "loading {} bytes", loaded),
            },
            LoadEvent::Loaded(model) => {
                self.loader = None;
                self.on_model_loaded(model);
            }
            LoadEvent::Failed(reason) => {
                self.loader = None;
                self.fail_load(reason);
            }
        }
    }

    fn poll_loader(&mut self, dt: f32) {
        if self.state != CompositorState::Loading {
            return;
        }

        if dt.is_finite() && dt > 0.0 {
            self.loading_elapsed += dt;
        }
        if !self.stall_reported && self.loading_elapsed > self.config.loading_stall_seconds {
            self.stall_reported = true;
            crate::overlay_warn!(
                SOURCE,
                "model '{}' still loading after {:.1}s",
                self.uri,
                self.loading_elapsed
            );
        }

        if let Some(event) = self.loader.as_mut().and_then(|loader| loader.poll()) {
            self.handle_load_event(event);
        }
    }

    fn on_model_loaded(&mut self, model: ModelNode) {
        let root = self.graph.root();
        let key = match self.graph.attach(root, model) {
            Ok(key) => key,
            Err(e) => return self.fail_load(e.to_string()),
        };
        let report = match self.normalizer.normalize(&mut self.graph, key) {
            Ok(report) => report,
            Err(e) => {
                // leave no half-set-up model behind
                let _ = self.graph.remove_subtree(key);
                return self.fail_load(e.to_string());
            }
        };
        self.model = Some(key);

        let located = self.locator.locate(&self.graph, key);
        if located.is_fallback() {
            self.notices.push(Error::SurfaceNotFound(format!(
                "no mesh matched {:?}",
                self.locator.candidates()
            )));
        }

        match SurfaceDescriptor::compute(&self.graph, located.node, self.config.surface_local_normal) {
            Some(surface) => {
                self.framer.frame(&mut self.camera, &surface);
            }
            None => {
                crate::overlay_warn!(SOURCE, "surface cannot be measured; framing the whole model");
                self.framer.frame_bounds(&mut self.camera, &report.bounds);
            }
        }
        self.controls.sync_from_camera(&self.camera);

        self.surface = Some(located);
        self.state = CompositorState::Ready;
        crate::overlay_info!(SOURCE, "model '{}' ready", self.uri);

        self.map_logged();
    }

    /// Failed load: warn, show a placeholder, enter `Failed`.
    fn fail_load(&mut self, reason: String) {
        let kind = self.config.placeholder_for(&self.uri);
        crate::overlay_warn!(
            SOURCE,
            "model '{}' failed to load: {}; showing {:?} placeholder",
            self.uri,
            reason,
            kind
        );
        self.notices.push(Error::LoadFailure(reason.clone()));
        self.state = CompositorState::Failed(reason);
        self.loader = None;

        let root = self.graph.root();
        let Ok(key) = self.graph.attach(root, build_placeholder(kind)) else { return };
        if let Ok(report) = self.normalizer.normalize(&mut self.graph, key) {
            self.framer.frame_bounds(&mut self.camera, &report.bounds);
            self.controls.sync_from_camera(&self.camera);
        }
        self.placeholder = IdleAnimator::for_placeholder(&self.graph, key, kind, self.config.idle_animation)
            .map(|animator| (kind, animator));
    }

    // ===== PER FRAME =====

    /// Advance one frame of `dt` seconds. Never fails: missing pieces
    /// (no model yet, no content element) are skipped.
    pub fn tick(&mut self, dt: f32) {
        self.drain_events();
        self.poll_loader(dt);

        if let Some((_, animator)) = self.placeholder.as_mut() {
            if animator.advance(&mut self.graph, dt).is_err() {
                self.placeholder = None;
            }
        }

        self.controls.update(&mut self.camera);
        self.refresh_mapping();
        self.update_presentation();
    }

    /// Drop the mapping when its surface or content went away; retry a
    /// mapping made with a zero-size content element.
    fn refresh_mapping(&mut self) {
        if self.content.is_some() && self.live_content().is_none() {
            crate::overlay_warn!(SOURCE, "content element was dropped by the host; overlay removed");
            self.notices.push(Error::MissingContentElement);
            self.content = None;
            self.mapping = None;
            self.presentation = None;
            self.presented = None;
            return;
        }

        let Some(mapping) = self.mapping else { return };
        if !self.graph.contains(mapping.surface.node) {
            crate::overlay_warn!(SOURCE, "surface node left the scene; overlay removed");
            self.mapping = None;
            self.surface = None;
            self.presentation = None;
            self.presented = None;
            return;
        }

        if mapping.outcome.degenerate_content {
            if self.content_size().is_some_and(|size| !size.is_degenerate()) {
                crate::overlay_info!(SOURCE, "content element laid out; remapping overlay");
                self.map_logged();
            }
        }
    }

    fn update_presentation(&mut self) {
        let Some(mapping) = self.mapping else { return };
        let Some(content) = self.live_content() else { return };

        self.deliver_transform(&content);

        let decision = self.gate.evaluate(mapping.surface.centroid, mapping.surface.normal, self.camera.position);
        self.presentation = Some(decision);
        let changed = self
            .presented
            .map(|last| last.visible != decision.visible || last.opacity != decision.opacity)
            .unwrap_or(true);
        if changed {
            // busy element: retried next tick
            if let Ok(mut element) = content.try_borrow_mut() {
                element.set_presentation(decision.visible, decision.opacity);
                self.presented = Some(decision);
            }
        }
    }

    /// What the overlay pass should draw this frame, if anything.
    pub fn overlay_draw(&self) -> Option<OverlayDraw> {
        let mapping = self.mapping?;
        let decision = self.presentation.filter(|d| d.visible)?;
        Some(OverlayDraw {
            world: mapping.outcome.placement.world_matrix(),
            opacity: decision.opacity,
            content_size: mapping.outcome.content_size,
        })
    }

    // ===== ACCESSORS =====

    pub fn state(&self) -> &CompositorState {
        &self.state
    }

    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    /// Orbit controls for host input (drag, wheel).
    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    /// Root of the loaded, normalized model.
    pub fn model(&self) -> Option<NodeKey> {
        self.model
    }

    pub fn surface(&self) -> Option<&LocatedSurface> {
        self.surface.as_ref()
    }

    /// Descriptor the current mapping was computed from.
    pub fn surface_descriptor(&self) -> Option<SurfaceDescriptor> {
        self.mapping.map(|m| m.surface)
    }

    pub fn mapping(&self) -> Option<&MappingOutcome> {
        self.mapping.as_ref().map(|m| &m.outcome)
    }

    pub fn occluder(&self) -> Option<NodeKey> {
        self.occluder
    }

    /// Last visibility decision applied to the content element.
    pub fn presentation(&self) -> Option<VisibilityDecision> {
        self.presentation
    }

    pub fn placeholder(&self) -> Option<PlaceholderKind> {
        self.placeholder.as_ref().map(|(kind, _)| *kind)
    }

    pub fn is_page_visible(&self) -> bool {
        self.page_visible
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Recoverable conditions met so far, oldest first, for the host to
    /// surface as notices.
    pub fn notices(&self) -> &[Error] {
        &self.notices
    }

    /// Current content size, if a live element is attached.
    pub fn content_size(&self) -> Option<ContentSize> {
        let content = self.live_content()?;
        let size = content.try_borrow().map(|element| element.pixel_size()).ok();
        size
    }
}

impl fmt::Debug for Compositor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compositor")
            .field("state", &self.state)
            .field("uri", &self.uri)
            .field("model", &self.model)
            .field("surface", &self.surface)
            .field("mapped", &self.mapping.is_some())
            .field("page_visible", &self.page_visible)
            .finish()
    }
}

#[cfg(test)]
#[path = "compositor_tests.rs"]
mod tests;
