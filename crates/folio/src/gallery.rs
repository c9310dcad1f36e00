use crate::carousel::{ItemPlacement, RotationController, Shade, ThemeColors, ViewportTier};
use crate::config::{self, Config};
use crate::events::{AppEvent, Rect};
use folioctl::manifest::{FileEntry, FileKind, FolderName, FolderRecord, Manifest, ManifestError};
use serde::Serialize;

pub const PREVIEW_TILES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PreviewTile {
    Image { url: String },
    Placeholder,
    Empty,
}

#[derive(Debug, Clone)]
pub struct Folder {
    pub name: FolderName,
    pub files: Vec<FileEntry>,
}

impl Folder {
    pub fn new(record: &FolderRecord, url_prefix: &str) -> Self {
        Self {
            name: record.name.clone(),
            files: record.resolve(url_prefix),
        }
    }

    pub fn title(&self) -> String {
        self.name.title()
    }

    /// First few files as cover tiles, padded to a fixed count.
    pub fn preview(&self) -> Vec<PreviewTile> {
        let mut tiles: Vec<PreviewTile> = self
            .files
            .iter()
            .take(PREVIEW_TILES)
            .map(|file| match file.kind {
                FileKind::Image => PreviewTile::Image {
                    url: file.url.clone(),
                },
                _ => PreviewTile::Placeholder,
            })
            .collect();
        tiles.resize(PREVIEW_TILES, PreviewTile::Empty);
        tiles
    }
}

#[derive(Debug, Clone)]
pub enum ContentState {
    Loading,
    Loaded(Vec<Folder>),
    Unavailable(String),
}

impl ContentState {
    pub fn folders(&self) -> &[Folder] {
        match self {
            Self::Loaded(folders) => folders,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "lowercase")]
pub enum Status {
    Loading,
    Ready,
    Empty,
    Unavailable(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct OpenFolder {
    pub index: usize,
    pub title: String,
    pub files: Vec<FileEntry>,
    pub origin: Rect,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedItem {
    pub index: usize,
    pub title: String,
    pub placement: ItemPlacement,
    pub css: String,
    pub shade: Shade,
    pub preview: Vec<PreviewTile>,
}

/// Everything a renderer needs for one frame. Items are back to front.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub angle: f64,
    pub velocity: f64,
    pub dragging: bool,
    pub tier: ViewportTier,
    pub radius: f64,
    pub status: Status,
    pub items: Vec<RenderedItem>,
    pub modal: Option<OpenFolder>,
}

pub struct Gallery {
    config: Config,
    controller: RotationController,
    content: ContentState,
    viewport_width: f64,
    modal: Option<OpenFolder>,
    colors: ThemeColors,
}

impl Gallery {
    pub fn new(config: Config) -> Self {
        let viewport_width = config.daemon.viewport_width;
        let tier = ViewportTier::resolve(viewport_width, &config.viewport);
        let controller = RotationController::new(config.carousel, tier.radius(&config.viewport));
        let colors = ThemeColors::from_config(&config.theme);

        Self {
            config,
            controller,
            content: ContentState::Loading,
            viewport_width,
            modal: None,
            colors,
        }
    }

    pub fn controller(&self) -> &RotationController {
        &self.controller
    }

    pub fn content(&self) -> &ContentState {
        &self.content
    }

    pub fn folders(&self) -> &[Folder] {
        self.content.folders()
    }

    pub fn modal(&self) -> Option<&OpenFolder> {
        self.modal.as_ref()
    }

    pub fn tier(&self) -> ViewportTier {
        ViewportTier::resolve(self.viewport_width, &self.config.viewport)
    }

    pub fn load_content(&mut self) {
        let path = self.config.content.manifest.clone();
        self.set_manifest(Manifest::load(&path));
    }

    /// A failed load leaves the wheel empty rather than erroring out.
    pub fn set_manifest(&mut self, result: Result<Manifest, ManifestError>) {
        match result {
            Ok(manifest) => {
                let prefix = &self.config.content.url_prefix;
                let folders: Vec<Folder> =
                    manifest.iter().map(|r| Folder::new(r, prefix)).collect();
                log::info!("Loaded {} folders", folders.len());
                self.content = ContentState::Loaded(folders);
            }
            Err(e) => {
                log::error!("Content unavailable: {}", e);
                self.content = ContentState::Unavailable(e.to_string());
            }
        }

        let total = self.folders().len();
        if self.modal.as_ref().is_some_and(|m| m.index >= total) {
            self.modal = None;
        }
    }

    pub fn apply_config(&mut self, config: Config) {
        self.controller.set_tuning(config.carousel);
        self.colors = ThemeColors::from_config(&config.theme);
        self.config = config;
        self.apply_viewport();
    }

    fn apply_viewport(&mut self) {
        let radius = self.tier().radius(&self.config.viewport);
        self.controller.set_radius(radius);
    }

    pub fn resize(&mut self, width: f64) {
        if !(width.is_finite() && width > 0.0) {
            log::warn!("Ignoring viewport width {}", width);
            return;
        }
        self.viewport_width = width;
        self.apply_viewport();
        log::debug!("Viewport {}px, {} tier", width, self.tier());
    }

    pub fn select(&mut self, index: usize, origin: Rect) -> Option<&OpenFolder> {
        let Some(folder) = self.folders().get(index) else {
            log::warn!(
                "Ignoring selection of item {} ({} available)",
                index,
                self.folders().len()
            );
            return None;
        };

        let open = OpenFolder {
            index,
            title: folder.title(),
            files: folder.files.clone(),
            origin,
        };
        log::debug!("Opened {:?} with {} files", open.title, open.files.len());
        self.modal = Some(open);
        self.modal.as_ref()
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Applies one event. Returns whether the visible state may have changed.
    pub fn update(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::DragStart(y) => {
                self.controller.on_drag_start(y);
                true
            }
            AppEvent::DragMove { y, timestamp_ms } => {
                self.controller.on_drag_move(y, timestamp_ms);
                self.controller.is_dragging()
            }
            AppEvent::DragEnd => {
                self.controller.on_drag_end();
                true
            }
            AppEvent::Wheel(delta) => {
                self.controller.on_wheel(delta);
                true
            }
            AppEvent::Tick => self.controller.tick(),
            AppEvent::Resize(width) => {
                self.resize(width);
                true
            }
            AppEvent::Select { index, origin } => self.select(index, origin).is_some(),
            AppEvent::CloseModal => {
                let was_open = self.modal.is_some();
                self.close_modal();
                was_open
            }
            AppEvent::ContentReload => {
                self.load_content();
                true
            }
            AppEvent::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.apply_config(new_config);
                    log::info!("Configuration reloaded");
                    true
                }
                Err(e) => {
                    log::error!("Failed to reload config: {}", e);
                    false
                }
            },
        }
    }

    pub fn status(&self) -> Status {
        match &self.content {
            ContentState::Loading => Status::Loading,
            ContentState::Unavailable(reason) => Status::Unavailable(reason.clone()),
            ContentState::Loaded(folders) if folders.is_empty() => Status::Empty,
            ContentState::Loaded(_) => Status::Ready,
        }
    }

    /// Advances one tick and snapshots the result.
    pub fn frame(&mut self) -> Frame {
        self.controller.tick();
        self.snapshot()
    }

    pub fn snapshot(&self) -> Frame {
        let folders = self.folders();
        let total = folders.len();

        let items = self
            .controller
            .draw_order(total)
            .into_iter()
            .filter_map(|index| {
                let placement = self.controller.placement(index, total)?;
                let folder = &folders[index];
                Some(RenderedItem {
                    index,
                    title: folder.title(),
                    css: placement.transform.to_css(),
                    shade: Shade::from_depth(placement.depth_weight, &self.colors),
                    preview: folder.preview(),
                    placement,
                })
            })
            .collect();

        let state = self.controller.state();
        Frame {
            angle: state.angle,
            velocity: state.velocity,
            dragging: state.is_dragging,
            tier: self.tier(),
            radius: self.controller.radius(),
            status: self.status(),
            items,
            modal: self.modal.clone(),
        }
    }
}
