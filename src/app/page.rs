//! Page composition — turns the catalog into a tree of reveal containers and
//! keeps their observed regions in sync with the layout.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::core::{
    catalog::Catalog,
    reveal::RevealGroup,
    stagger::StaggerConfig,
    tween::Variants,
    viewport::{Amount, IntersectionSupport, Margin, ObserveOptions, Viewport},
};
use crate::ui::layout::PageLayout;

pub const SECTION_TITLE: &str = "Why Choose GitOps/NOW";
pub const SECTION_DESCRIPTION: &str =
    "Experience the future of infrastructure management with our platform";

/// Timing knobs shared by every container on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealSettings {
    pub support: IntersectionSupport,
    /// Top-level cards.
    pub coarse: StaggerConfig,
    /// Rows inside a category card.
    pub fine: StaggerConfig,
    pub title_duration: Duration,
    pub card_duration: Duration,
    pub reduced_motion: bool,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            support: IntersectionSupport::Supported,
            coarse: StaggerConfig::COARSE,
            fine: StaggerConfig::FINE,
            title_duration: Duration::from_millis(800),
            card_duration: Duration::from_millis(300),
            reduced_motion: false,
        }
    }
}

impl RevealSettings {
    fn profile(&self, config: StaggerConfig) -> StaggerConfig {
        if self.reduced_motion {
            config.reduced()
        } else {
            config
        }
    }
}

/// Reveal containers for one category card: the card itself and its rows.
#[derive(Debug)]
pub struct CategoryReveal {
    pub card: RevealGroup,
    pub rows: RevealGroup,
}

/// The live page: content, geometry and every reveal container.
#[derive(Debug)]
pub struct Page {
    catalog: Catalog,
    settings: RevealSettings,
    layout: PageLayout,
    title: RevealGroup,
    /// One container per benefit card.
    benefits: Vec<RevealGroup>,
    categories: Vec<CategoryReveal>,
    /// Number of times the page has been rebuilt from scratch.
    generation: u64,
}

impl Page {
    pub fn new(catalog: Catalog, settings: RevealSettings, width: u16) -> Self {
        if catalog.is_empty() {
            warn!("catalog is empty; only the section title will reveal");
        }
        let layout = PageLayout::compute(&catalog, SECTION_DESCRIPTION, width);
        let (title, benefits, categories) = build_groups(&catalog, &layout, &settings);
        info!(
            benefits = catalog.benefits.len(),
            groups = catalog.groups.len(),
            width,
            "page built"
        );
        Self {
            catalog,
            settings,
            layout,
            title,
            benefits,
            categories,
            generation: 0,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn height(&self) -> i32 {
        self.layout.height
    }

    pub fn title(&self) -> &RevealGroup {
        &self.title
    }

    pub fn benefits(&self) -> &[RevealGroup] {
        &self.benefits
    }

    pub fn categories(&self) -> &[CategoryReveal] {
        &self.categories
    }

    /// Re-layout for a new terminal width.  Revealed items stay revealed;
    /// observers still waiting simply watch their new regions.
    pub fn relayout(&mut self, width: u16) {
        if width == self.layout.width {
            return;
        }
        self.layout = PageLayout::compute(&self.catalog, SECTION_DESCRIPTION, width);
        self.title.set_region(self.layout.title.region());
        for (reveal, card) in self.benefits.iter_mut().zip(&self.layout.benefit_cards) {
            reveal.set_region(card.region());
        }
        for ((reveal, card), list) in self
            .categories
            .iter_mut()
            .zip(&self.layout.category_cards)
            .zip(&self.layout.category_lists)
        {
            reveal.card.set_region(card.region());
            reveal.rows.set_region(list.region());
        }
        debug!(width, height = self.layout.height, "page relayout");
    }

    /// Drive every container one frame.  Returns how many items became visible.
    pub fn update(&mut self, viewport: Viewport, now: Instant) -> usize {
        let mut revealed = self.title.update(viewport, now);
        for card in &mut self.benefits {
            revealed += card.update(viewport, now);
        }
        for reveal in &mut self.categories {
            revealed += reveal.card.update(viewport, now);
            revealed += reveal.rows.update(viewport, now);
        }
        revealed
    }

    /// Tear every container down and mount fresh, hidden instances.
    pub fn replay(&mut self) {
        for group in self.groups_mut() {
            group.teardown();
        }
        let (title, benefits, categories) = build_groups(&self.catalog, &self.layout, &self.settings);
        self.title = title;
        self.benefits = benefits;
        self.categories = categories;
        self.generation += 1;
        info!(generation = self.generation, "page replay");
    }

    /// `(revealed, total)` over every revealable instance on the page.
    pub fn reveal_progress(&self) -> (usize, usize) {
        self.groups()
            .fold((0, 0), |(done, total), g| (done + g.revealed_count(), total + g.len()))
    }

    /// Containers whose observer is still waiting for the viewport.
    pub fn watching(&self) -> usize {
        self.groups().filter(|g| g.is_watching()).count()
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.groups().any(|g| g.is_animating(now))
    }

    fn groups(&self) -> impl Iterator<Item = &RevealGroup> {
        std::iter::once(&self.title)
            .chain(&self.benefits)
            .chain(self.categories.iter().flat_map(|c| [&c.card, &c.rows]))
    }

    fn groups_mut(&mut self) -> impl Iterator<Item = &mut RevealGroup> {
        std::iter::once(&mut self.title)
            .chain(&mut self.benefits)
            .chain(self.categories.iter_mut().flat_map(|c| [&mut c.card, &mut c.rows]))
    }
}

fn build_groups(
    catalog: &Catalog,
    layout: &PageLayout,
    settings: &RevealSettings,
) -> (RevealGroup, Vec<RevealGroup>, Vec<CategoryReveal>) {
    let inset = ObserveOptions::default().margin(Margin::Percent(-10.0));

    let title = RevealGroup::new(
        "title",
        layout.title.region(),
        ObserveOptions::default(),
        settings.support,
        settings.profile(StaggerConfig::single(settings.title_duration)),
        Variants::rise(),
        1,
    );

    let coarse = settings.profile(settings.coarse);
    let benefits = catalog
        .benefits
        .iter()
        .zip(&layout.benefit_cards)
        .enumerate()
        .map(|(i, (benefit, card))| {
            RevealGroup::new(
                format!("{} benefit", benefit.title),
                card.region(),
                ObserveOptions::default(),
                settings.support,
                coarse.nth(i),
                Variants::rise(),
                1,
            )
        })
        .collect();

    let categories = catalog
        .groups
        .iter()
        .zip(&layout.category_cards)
        .zip(&layout.category_lists)
        .map(|((group, card), list)| CategoryReveal {
            card: RevealGroup::new(
                format!("{} card", group.title),
                card.region(),
                inset,
                settings.support,
                settings.profile(StaggerConfig::single(settings.card_duration)),
                Variants::rise(),
                1,
            ),
            rows: RevealGroup::new(
                format!("{} rows", group.title),
                list.region(),
                inset.amount(Amount::Fraction(0.2)),
                settings.support,
                settings.profile(settings.fine),
                Variants::slide_in(),
                group.items.len(),
            ),
        })
        .collect();

    (title, benefits, categories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reveal::RevealState;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn page(settings: RevealSettings) -> Page {
        Page::new(Catalog::builtin(), settings, 160)
    }

    fn benefits_revealed(p: &Page) -> usize {
        p.benefits().iter().map(|g| g.revealed_count()).sum()
    }

    #[test]
    fn nothing_below_the_fold_reveals() {
        let t0 = Instant::now();
        let mut p = page(RevealSettings::default());
        let above_grid = (p.layout().benefit_grid.top - 1) as u16;
        for step in 0..100u64 {
            p.update(Viewport::new(0, above_grid), t0 + ms(step * 16));
        }
        assert_eq!(p.title().revealed_count(), 1);
        assert_eq!(benefits_revealed(&p), 0);
        assert!(p.categories().iter().all(|c| c.card.revealed_count() == 0));
        assert_eq!(p.watching(), p.benefits().len() + 2 * p.categories().len());
    }

    #[test]
    fn scrolling_down_reveals_everything() {
        let t0 = Instant::now();
        let mut p = page(RevealSettings::default());
        let height = p.height();
        let mut now = t0;
        let mut top = 0;
        while top < height {
            for _ in 0..60 {
                now += ms(16);
                p.update(Viewport::new(top, 30), now);
            }
            top += 10;
        }
        let (done, total) = p.reveal_progress();
        assert_eq!(done, total);
        assert_eq!(p.watching(), 0);
        assert!(!p.is_animating(now + ms(1000)));
    }

    #[test]
    fn unsupported_observers_reveal_without_scrolling() {
        let t0 = Instant::now();
        let settings = RevealSettings {
            support: IntersectionSupport::Unsupported,
            ..Default::default()
        };
        let mut p = page(settings);
        p.update(Viewport::new(0, 10), t0);
        p.update(Viewport::new(0, 10), t0 + ms(2000));
        let (done, total) = p.reveal_progress();
        assert_eq!(done, total);
    }

    #[test]
    fn reduced_motion_reveals_on_the_trigger_frame() {
        let t0 = Instant::now();
        let settings = RevealSettings {
            reduced_motion: true,
            ..Default::default()
        };
        let mut p = page(settings);
        let grid = p.layout().benefit_grid;
        p.update(Viewport::new(grid.top, grid.height), t0);
        assert_eq!(benefits_revealed(&p), p.catalog().benefits.len());
        let shown = p.benefits()[3].presentation(0, t0);
        assert_eq!(shown.map(|s| s.visual.opacity), Some(1.0));
    }

    #[test]
    fn benefit_cards_keep_the_coarse_stagger() {
        let t0 = Instant::now();
        let mut p = page(RevealSettings::default());
        let grid = p.layout().benefit_grid;
        let viewport = Viewport::new(grid.top, grid.height);
        p.update(viewport, t0);
        assert_eq!(benefits_revealed(&p), 1);
        p.update(viewport, t0 + ms(299));
        assert_eq!(benefits_revealed(&p), 3);
        p.update(viewport, t0 + ms(300));
        assert_eq!(benefits_revealed(&p), 4);
    }

    #[test]
    fn stacked_benefit_cards_wait_for_their_own_rows() {
        let t0 = Instant::now();
        let mut p = Page::new(Catalog::builtin(), RevealSettings::default(), 40);
        let first = p.layout().benefit_cards[0];
        let second = p.layout().benefit_cards[1];
        assert!(second.top >= first.bottom(), "single column layout");

        let viewport = Viewport::new(first.top, first.height);
        for step in 0..100u64 {
            p.update(viewport, t0 + ms(step * 16));
        }
        let revealed: Vec<_> = p.benefits().iter().map(|g| g.revealed_count()).collect();
        assert_eq!(revealed, [1, 0, 0, 0]);
    }

    #[test]
    fn replay_remounts_hidden_instances() {
        let t0 = Instant::now();
        let mut p = page(RevealSettings::default());
        let grid = p.layout().benefit_grid;
        p.update(Viewport::new(grid.top, grid.height), t0);
        p.update(Viewport::new(grid.top, grid.height), t0 + ms(150));
        assert_eq!(benefits_revealed(&p), 2);

        p.replay();
        assert_eq!(p.generation(), 1);
        assert_eq!(benefits_revealed(&p), 0);
        assert!(p.benefits().iter().all(|g| g.is_watching()));
        assert_eq!(
            p.benefits()[0].presentation(0, t0).map(|s| s.state),
            Some(RevealState::Hidden)
        );
    }

    #[test]
    fn relayout_moves_waiting_observers() {
        let t0 = Instant::now();
        let mut p = page(RevealSettings::default());
        let wide = p.layout().category_cards[0];
        p.relayout(60);
        let narrow = p.layout().category_cards[0];
        assert!(narrow.top >= wide.bottom());

        p.update(Viewport::new(wide.top, wide.height), t0);
        assert_eq!(p.categories()[0].card.revealed_count(), 0);
        p.update(Viewport::new(narrow.top, narrow.height), t0 + ms(16));
        assert_eq!(p.categories()[0].card.revealed_count(), 1);
    }
}
