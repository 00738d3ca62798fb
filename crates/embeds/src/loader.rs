use foundation::bounds::{Insets, Rect};
use runtime::EventBus;

use crate::descriptor::{EmbedSource, WidgetUrlTemplate};

/// Index of an observed container, in registration order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EmbedId(u32);

impl EmbedId {
    pub fn index(self) -> u32 {
        self.0
    }

    pub fn from_index(index: u32) -> Self {
        EmbedId(index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredEmbed {
    pub id: EmbedId,
    pub source: EmbedSource,
    loaded: bool,
}

impl DeferredEmbed {
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

/// One intersection-observer record, translated to an embed id.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VisibilityEntry {
    pub target: EmbedId,
    pub intersecting: bool,
}

impl VisibilityEntry {
    pub fn new(target: EmbedId, intersecting: bool) -> Self {
        Self {
            target,
            intersecting,
        }
    }
}

/// What the host must insert into a container. Every action also retires the
/// container: the host stops observing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadAction {
    /// Iframe filling the container, low-priority lazy loading hints.
    InsertFrame { id: EmbedId, url: String },
    /// Async script; the widget initialises itself once fetched.
    InsertScript { id: EmbedId, url: String },
}

impl LoadAction {
    pub fn id(&self) -> EmbedId {
        match self {
            LoadAction::InsertFrame { id, .. } | LoadAction::InsertScript { id, .. } => *id,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            LoadAction::InsertFrame { url, .. } | LoadAction::InsertScript { url, .. } => url,
        }
    }
}

/// Visibility-gated loader.
///
/// Contract:
/// - A container's resource is instantiated at most once. The loaded flag is
///   checked and set inside the same callback on the single page thread.
/// - Nothing is emitted for a container until it intersects the viewport
///   expanded by the proximity margin.
/// - `Missing` sources are never emitted and never marked loaded.
#[derive(Debug)]
pub struct LazyLoader {
    embeds: Vec<DeferredEmbed>,
    template: WidgetUrlTemplate,
    margin: Insets,
}

impl LazyLoader {
    pub fn new(template: WidgetUrlTemplate, margin: Insets) -> Self {
        Self {
            embeds: Vec::new(),
            template,
            margin,
        }
    }

    pub fn register(&mut self, source: EmbedSource) -> EmbedId {
        let id = EmbedId(self.embeds.len() as u32);
        self.embeds.push(DeferredEmbed {
            id,
            source,
            loaded: false,
        });
        id
    }

    pub fn get(&self, id: EmbedId) -> Option<&DeferredEmbed> {
        self.embeds.get(id.index() as usize)
    }

    pub fn is_loaded(&self, id: EmbedId) -> bool {
        self.get(id).is_some_and(DeferredEmbed::is_loaded)
    }

    pub fn len(&self) -> usize {
        self.embeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.embeds.is_empty()
    }

    /// Containers that can still load.
    pub fn pending(&self) -> usize {
        self.embeds
            .iter()
            .filter(|e| !e.loaded && !e.source.is_missing())
            .count()
    }

    /// The proximity margin as an intersection-observer `rootMargin`.
    pub fn root_margin(&self) -> String {
        self.margin.to_css()
    }

    pub fn on_visibility(
        &mut self,
        entries: &[VisibilityEntry],
        bus: &mut EventBus,
    ) -> Vec<LoadAction> {
        let mut out = Vec::new();
        for entry in entries {
            if !entry.intersecting {
                continue;
            }
            let Some(embed) = self.embeds.get_mut(entry.target.index() as usize) else {
                continue;
            };
            if embed.loaded {
                continue;
            }

            let action = match &embed.source {
                EmbedSource::Frame { url } => LoadAction::InsertFrame {
                    id: embed.id,
                    url: url.clone(),
                },
                EmbedSource::Widget { airport, kind } => LoadAction::InsertScript {
                    id: embed.id,
                    url: self.template.render(airport, kind),
                },
                EmbedSource::Missing => {
                    bus.emit("embed.skip", format!("#{} has no source", embed.id.index()));
                    continue;
                }
            };

            embed.loaded = true;
            bus.emit(
                "embed.load",
                format!("#{} -> {}", embed.id.index(), action.url()),
            );
            out.push(action);
        }
        out
    }

    /// Geometry fallback for hosts without an intersection observer: tests
    /// every pending container against the margin-expanded viewport.
    ///
    /// `bounds_of` returns `None` for containers that are no longer laid out.
    /// Empty rectangles (hidden containers) never count as visible, and
    /// containers without a source are not considered at all.
    pub fn scan<F>(&mut self, viewport: Rect, bounds_of: F, bus: &mut EventBus) -> Vec<LoadAction>
    where
        F: Fn(EmbedId) -> Option<Rect>,
    {
        let area = viewport.expand(self.margin);
        let entries: Vec<VisibilityEntry> = self
            .embeds
            .iter()
            .filter(|e| !e.loaded && !e.source.is_missing())
            .filter_map(|e| {
                let bounds = bounds_of(e.id).filter(|r| !r.is_empty())?;
                Some(VisibilityEntry::new(e.id, area.intersects(&bounds)))
            })
            .collect();
        self.on_visibility(&entries, bus)
    }
}

#[cfg(test)]
mod tests {
    use super::{EmbedId, LazyLoader, LoadAction, VisibilityEntry};
    use crate::descriptor::{EmbedSource, WidgetUrlTemplate};
    use foundation::bounds::{Insets, Rect};
    use pretty_assertions::assert_eq;
    use runtime::EventBus;

    fn loader() -> LazyLoader {
        LazyLoader::new(WidgetUrlTemplate::default(), Insets::uniform(200.0))
    }

    fn frame(url: &str) -> EmbedSource {
        EmbedSource::frame(Some(url.to_string()))
    }

    #[test]
    fn nothing_loads_before_intersection() {
        let mut l = loader();
        let a = l.register(frame("https://a.test/"));
        let mut bus = EventBus::new();

        let actions = l.on_visibility(&[VisibilityEntry::new(a, false)], &mut bus);
        assert!(actions.is_empty());
        assert!(!l.is_loaded(a));
        assert_eq!(l.pending(), 1);
    }

    #[test]
    fn loads_at_most_once() {
        let mut l = loader();
        let a = l.register(frame("https://a.test/"));
        let mut bus = EventBus::new();

        let first = l.on_visibility(&[VisibilityEntry::new(a, true)], &mut bus);
        assert_eq!(
            first,
            vec![LoadAction::InsertFrame {
                id: a,
                url: "https://a.test/".to_string()
            }]
        );
        assert!(l.is_loaded(a));

        let again = l.on_visibility(
            &[VisibilityEntry::new(a, true), VisibilityEntry::new(a, true)],
            &mut bus,
        );
        assert!(again.is_empty());
        assert_eq!(l.pending(), 0);
    }

    #[test]
    fn duplicate_entries_in_one_batch_load_once() {
        let mut l = loader();
        let a = l.register(frame("https://a.test/"));
        let mut bus = EventBus::new();
        let actions = l.on_visibility(
            &[VisibilityEntry::new(a, true), VisibilityEntry::new(a, true)],
            &mut bus,
        );
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn widget_url_comes_from_template() {
        let mut l = loader();
        let w = l.register(EmbedSource::widget(
            Some("IST".to_string()),
            Some("departures".to_string()),
        ));
        let mut bus = EventBus::new();
        let actions = l.on_visibility(&[VisibilityEntry::new(w, true)], &mut bus);
        assert_eq!(
            actions,
            vec![LoadAction::InsertScript {
                id: w,
                url: "https://fids.flightradar.live/widgets/airport/IST/departures".to_string()
            }]
        );
    }

    #[test]
    fn missing_source_is_skipped_silently() {
        let mut l = loader();
        let m = l.register(EmbedSource::frame(None));
        let mut bus = EventBus::new();
        assert!(l.on_visibility(&[VisibilityEntry::new(m, true)], &mut bus).is_empty());
        assert!(!l.is_loaded(m));
        assert_eq!(l.pending(), 0);
        assert_eq!(bus.events()[0].kind, "embed.skip");
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut l = loader();
        let mut bus = EventBus::new();
        let actions =
            l.on_visibility(&[VisibilityEntry::new(EmbedId::from_index(7), true)], &mut bus);
        assert!(actions.is_empty());
    }

    #[test]
    fn scan_only_loads_within_proximity_margin() {
        let mut l = loader();
        let near = l.register(frame("https://near.test/"));
        let far = l.register(frame("https://far.test/"));
        let gone = l.register(frame("https://gone.test/"));
        let viewport = Rect::viewport(800.0, 600.0);
        let bounds = |id: EmbedId| match id.index() {
            0 => Some(Rect::new(0.0, 780.0, 800.0, 300.0)),
            1 => Some(Rect::new(0.0, 2000.0, 800.0, 300.0)),
            _ => None,
        };

        let mut bus = EventBus::new();
        let actions = l.scan(viewport, bounds, &mut bus);
        let ids: Vec<EmbedId> = actions.iter().map(LoadAction::id).collect();
        assert_eq!(ids, vec![near]);
        assert!(!l.is_loaded(far));
        assert!(!l.is_loaded(gone));

        // Scrolling the far container into range loads it; the near one stays single.
        let scrolled = |id: EmbedId| match id.index() {
            0 => Some(Rect::new(0.0, -1200.0, 800.0, 300.0)),
            1 => Some(Rect::new(0.0, 100.0, 800.0, 300.0)),
            _ => None,
        };
        let actions = l.scan(viewport, scrolled, &mut bus);
        let ids: Vec<EmbedId> = actions.iter().map(LoadAction::id).collect();
        assert_eq!(ids, vec![far]);
    }

    #[test]
    fn scan_ignores_hidden_containers() {
        let mut l = loader();
        let hidden = l.register(frame("https://hidden.test/"));
        let viewport = Rect::viewport(800.0, 600.0);

        let mut bus = EventBus::new();
        let actions = l.scan(viewport, |_| Some(Rect::new(0.0, 0.0, 0.0, 0.0)), &mut bus);
        assert!(actions.is_empty());
        assert!(!l.is_loaded(hidden));
        assert_eq!(l.pending(), 1);
    }

    #[test]
    fn scan_does_not_revisit_missing_sources() {
        let mut l = loader();
        l.register(EmbedSource::Missing);
        let viewport = Rect::viewport(800.0, 600.0);
        let on_screen = |_: EmbedId| Some(Rect::new(0.0, 0.0, 400.0, 300.0));

        let mut bus = EventBus::new();
        for _ in 0..3 {
            assert!(l.scan(viewport, on_screen, &mut bus).is_empty());
        }
        assert!(bus.events().is_empty());
    }

    #[test]
    fn root_margin_is_css() {
        assert_eq!(loader().root_margin(), "200px");
    }
}
