//! The shared optimal-fit breaker.
//!
//! Both axes use the same TeX-style dynamic program: line breaking over a
//! horizontal list and page breaking over a vertical list. The axis plugs in
//! through [`BreakableList`], which supplies element measures and
//! materializes the output boxes.
//!
//! For every legal breakpoint the breaker considers every feasible earlier
//! breakpoint, scores the chunk between them (badness from the fit ratio,
//! demerits from badness plus the break's penalty), and keeps the
//! predecessor minimizing cumulative demerits, ties going to the earliest
//! breakpoint. Forced breaks (a penalty at or beyond negative infinity) end
//! their chunk unconditionally and reset the search.

use quire_types::Sp;

use crate::element::{Discretionary, Element, Glue, Image, Penalty};

/// Badness assigned to a chunk that cannot fit, when a forced break leaves no
/// feasible alternative. Far beyond the regular clamp so a real fit always
/// wins.
const OVERFULL_BADNESS: f64 = 100_000.0;

/// The badness clamp: no feasible line is ever considered worse than this.
const MAX_BADNESS: f64 = 10_000.0;

/// Tunable demerit weights.
#[derive(Debug, Clone)]
pub struct BreakerConfig {
    /// Added to every chunk's badness before squaring; biases the breaker
    /// toward fewer output boxes.
    pub line_penalty: i64,
    /// Extra demerits for two consecutive breaks at discretionaries, to
    /// discourage stacked hyphens.
    pub flagged_pair_demerits: f64,
}

impl Default for BreakerConfig {
    fn default() -> BreakerConfig {
        BreakerConfig {
            line_penalty: 10,
            flagged_pair_demerits: 10_000.0,
        }
    }
}

/// A position in the element list where a break may be taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoint {
    /// Element index of the break element; the element count for the
    /// end-of-list break.
    index: usize,
    /// Index of the first element that lands in the following chunk: the
    /// discretionary itself for a discretionary break, otherwise the first
    /// non-discardable element after the break.
    start_index: usize,
}

impl Breakpoint {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }
}

/// Accumulated measures of the element range between two breakpoints.
#[derive(Debug, Clone, Default)]
pub struct Chunk {
    natural: Sp,
    stretch: FlexTotals,
    shrink: FlexTotals,
    images: Vec<Image>,
}

impl Chunk {
    pub fn natural(&self) -> Sp {
        self.natural
    }

    /// Whole-page images riding in this chunk.
    pub fn images(&self) -> &[Image] {
        &self.images
    }
}

/// Finite and infinite flexibility are tracked separately; any infinite
/// flexibility dominates all finite ones.
#[derive(Debug, Clone, Copy, Default)]
struct FlexTotals {
    finite: Sp,
    infinite: Sp,
}

/// The axis-specific half of the breaker.
pub trait BreakableList {
    type Output;

    fn elements(&self) -> &[Element];

    /// The element's extent along the breaking axis.
    fn element_size(&self, element: &Element) -> Sp;

    /// Wrap one chunk's elements into an output box. `counter` is the
    /// 1-based line or page number.
    fn make_output_box(&self, elements: Vec<Element>, counter: usize, shift: Sp) -> Self::Output;

    /// The elements of the chunk between two breakpoints, with
    /// discretionaries resolved and any per-box extras added.
    fn element_sublist(&self, begin: &Breakpoint, end: &Breakpoint) -> Vec<Element>;

    /// Extra advance of the output counter caused by this chunk; the
    /// vertical axis uses it to give whole-page images their own page
    /// numbers.
    fn chunk_extra_increment(&self, chunk: &Chunk) -> usize;

    /// Finite stretch available on every chunk beyond what its glue carries;
    /// ragged margins are modeled this way.
    fn extra_stretch(&self) -> Sp {
        0
    }

    /// Hook applied to each chunk's elements before the output box is made;
    /// the horizontal axis reorders right-to-left runs here.
    fn reverse_right_to_left(&self, elements: Vec<Element>) -> Vec<Element> {
        elements
    }
}

/// The boxes selected by the breaker, with the cumulative demerits of the
/// chosen breaks.
pub struct BreakOutcome<O> {
    pub boxes: Vec<O>,
    pub demerits: f64,
}

struct Node {
    breakpoint: Breakpoint,
    previous: Option<usize>,
    total_demerits: f64,
    ratio: f64,
    ratio_infinite: bool,
    flagged: bool,
    /// The counter the chunk starting at this node will carry.
    counter: usize,
}

struct Candidate {
    node: usize,
    total_demerits: f64,
    ratio: f64,
    ratio_infinite: bool,
    counter: usize,
}

struct Fit {
    ratio: f64,
    infinite: bool,
    /// Infinity when the chunk cannot fit even fully shrunk.
    badness: f64,
}

/// Prefix sums over the element list, letting any chunk be measured in
/// constant time. Discretionaries are counted at their no-break width and
/// adjusted at the chunk ends.
struct Measures {
    natural: Vec<Sp>,
    stretch_finite: Vec<Sp>,
    stretch_infinite: Vec<Sp>,
    shrink_finite: Vec<Sp>,
    shrink_infinite: Vec<Sp>,
    image_count: Vec<usize>,
}

impl Measures {
    fn new<L: BreakableList + ?Sized>(list: &L) -> Measures {
        let elements = list.elements();
        let n = elements.len();
        let mut measures = Measures {
            natural: vec![0; n + 1],
            stretch_finite: vec![0; n + 1],
            stretch_infinite: vec![0; n + 1],
            shrink_finite: vec![0; n + 1],
            shrink_infinite: vec![0; n + 1],
            image_count: vec![0; n + 1],
        };
        for (i, element) in elements.iter().enumerate() {
            measures.natural[i + 1] = measures.natural[i] + list.element_size(element);
            let (stretch, shrink) = match element {
                Element::Glue(glue) => (glue.stretch(), glue.shrink()),
                _ => Default::default(),
            };
            measures.stretch_finite[i + 1] =
                measures.stretch_finite[i] + if stretch.infinite { 0 } else { stretch.amount };
            measures.stretch_infinite[i + 1] =
                measures.stretch_infinite[i] + if stretch.infinite { stretch.amount } else { 0 };
            measures.shrink_finite[i + 1] =
                measures.shrink_finite[i] + if shrink.infinite { 0 } else { shrink.amount };
            measures.shrink_infinite[i + 1] =
                measures.shrink_infinite[i] + if shrink.infinite { shrink.amount } else { 0 };
            measures.image_count[i + 1] =
                measures.image_count[i] + matches!(element, Element::Image(_)) as usize;
        }
        measures
    }

    /// Measure the chunk from `begin` (a node) to the break at `index`. A
    /// begin past the break measures as an empty chunk; that is how blank
    /// pages arise.
    fn chunk<L: BreakableList + ?Sized>(
        &self,
        list: &L,
        begin: &Breakpoint,
        index: usize,
        with_images: bool,
    ) -> Chunk {
        let elements = list.elements();
        let start = begin.start_index();
        if start >= index {
            return Chunk::default();
        }

        let mut natural = self.natural[index] - self.natural[start];

        // A discretionary at the cut contributes its pre-break; one at the
        // start of the chunk was broken at, so its no-break width (already in
        // the prefix) is swapped for the post-break width.
        if let Some(Element::Discretionary(discretionary)) = elements.get(index) {
            natural += discretionary.pre_break().width();
        }
        if begin.index() == start {
            if let Some(Element::Discretionary(discretionary)) = elements.get(start) {
                natural += discretionary.post_break().width() - discretionary.no_break().width();
            }
        }

        let images = if with_images && self.image_count[index] > self.image_count[start] {
            elements[start..index]
                .iter()
                .filter_map(|element| match element {
                    Element::Image(image) => Some(image.clone()),
                    _ => None,
                })
                .collect()
        } else {
            Vec::new()
        };

        Chunk {
            natural,
            stretch: FlexTotals {
                finite: self.stretch_finite[index] - self.stretch_finite[start]
                    + list.extra_stretch(),
                infinite: self.stretch_infinite[index] - self.stretch_infinite[start],
            },
            shrink: FlexTotals {
                finite: self.shrink_finite[index] - self.shrink_finite[start],
                infinite: self.shrink_infinite[index] - self.shrink_infinite[start],
            },
            images,
        }
    }
}

fn compute_fit(target: Sp, chunk: &Chunk) -> Fit {
    let slack = target - chunk.natural;
    if slack == 0 {
        return Fit {
            ratio: 0.0,
            infinite: false,
            badness: 0.0,
        };
    }

    if slack > 0 {
        if chunk.stretch.infinite > 0 {
            Fit {
                ratio: slack as f64 / chunk.stretch.infinite as f64,
                infinite: true,
                badness: 0.0,
            }
        } else if chunk.stretch.finite > 0 {
            let ratio = slack as f64 / chunk.stretch.finite as f64;
            Fit {
                ratio,
                infinite: false,
                badness: badness_for_ratio(ratio),
            }
        } else {
            // Underfull with nothing to stretch.
            Fit {
                ratio: 0.0,
                infinite: false,
                badness: MAX_BADNESS,
            }
        }
    } else if chunk.shrink.infinite > 0 {
        Fit {
            ratio: slack as f64 / chunk.shrink.infinite as f64,
            infinite: true,
            badness: 0.0,
        }
    } else if chunk.shrink.finite > 0 {
        let ratio = slack as f64 / chunk.shrink.finite as f64;
        if ratio < -1.0 {
            // Cannot fit even fully shrunk.
            Fit {
                ratio: -1.0,
                infinite: false,
                badness: f64::INFINITY,
            }
        } else {
            Fit {
                ratio,
                infinite: false,
                badness: badness_for_ratio(ratio),
            }
        }
    } else {
        Fit {
            ratio: 0.0,
            infinite: false,
            badness: f64::INFINITY,
        }
    }
}

fn badness_for_ratio(ratio: f64) -> f64 {
    (100.0 * ratio.abs().powi(3)).min(MAX_BADNESS)
}

fn demerits(config: &BreakerConfig, badness: f64, penalty: i64, flagged_pair: bool) -> f64 {
    let mut demerits = (config.line_penalty as f64 + badness).powi(2);
    if penalty > 0 && penalty < Penalty::INFINITY {
        demerits += (penalty as f64).powi(2);
    } else if penalty < 0 && penalty > -Penalty::INFINITY {
        demerits -= (penalty as f64).powi(2);
    }
    if flagged_pair {
        demerits += config.flagged_pair_demerits;
    }
    demerits
}

fn legal_breakpoints(elements: &[Element]) -> Vec<usize> {
    let mut positions = Vec::new();
    for (i, element) in elements.iter().enumerate() {
        let legal = match element {
            Element::Penalty(penalty) => penalty.cost() < Penalty::INFINITY,
            Element::Discretionary(_) => true,
            Element::Glue(_) => {
                i > 0
                    && matches!(
                        elements[i - 1],
                        Element::Text(_)
                            | Element::HBox(_)
                            | Element::VBox(_)
                            | Element::Rule(_)
                            | Element::Kern(_)
                    )
            }
            _ => false,
        };
        if legal {
            positions.push(i);
        }
    }

    // The end of the list is always a forced break, unless the list already
    // ends with one.
    let ends_forced = matches!(
        elements.last(),
        Some(Element::Penalty(penalty)) if penalty.is_forced() && !penalty.is_even_pages_only()
    );
    if !ends_forced {
        positions.push(elements.len());
    }
    positions
}

fn start_index_after(elements: &[Element], index: usize) -> usize {
    if matches!(elements.get(index), Some(Element::Discretionary(_))) {
        return index;
    }
    let mut i = index;
    while i < elements.len() && elements[i].is_discardable() {
        i += 1;
    }
    i
}

/// Break the list against the target measure, materializing one output box
/// per chunk. Counters start at `first_counter` (1 for both lines and pages,
/// unless a document resumes at a later page).
pub fn break_list<L: BreakableList + ?Sized>(
    list: &L,
    target: Sp,
    config: &BreakerConfig,
    first_counter: usize,
) -> BreakOutcome<L::Output> {
    let elements = list.elements();
    if elements.is_empty() {
        return BreakOutcome {
            boxes: Vec::new(),
            demerits: 0.0,
        };
    }

    let measures = Measures::new(list);
    let positions = legal_breakpoints(elements);

    // Positions of forced penalties that only exist at the bottom of even
    // pages; chunks for an even counter may not cross them.
    let even_only_barriers: Vec<usize> = elements
        .iter()
        .enumerate()
        .filter_map(|(i, element)| match element {
            Element::Penalty(penalty)
                if penalty.is_forced() && penalty.is_even_pages_only() =>
            {
                Some(i)
            }
            _ => None,
        })
        .collect();

    let mut nodes = vec![Node {
        breakpoint: Breakpoint {
            index: 0,
            start_index: 0,
        },
        previous: None,
        total_demerits: 0.0,
        ratio: 0.0,
        ratio_infinite: false,
        flagged: false,
        counter: first_counter,
    }];
    let mut active: Vec<usize> = vec![0];
    let mut last_node = 0usize;

    for &position in &positions {
        let (penalty_cost, even_only, flagged) = match elements.get(position) {
            Some(Element::Penalty(penalty)) => {
                (penalty.cost(), penalty.is_even_pages_only(), false)
            }
            Some(Element::Discretionary(discretionary)) => (discretionary.penalty(), false, true),
            Some(Element::Glue(_)) => (0, false, false),
            None => (-Penalty::INFINITY, false, false),
            Some(other) => unreachable!("illegal breakpoint element {other:?}"),
        };
        let forced = penalty_cost <= -Penalty::INFINITY;

        let mut best: Option<Candidate> = None;
        let mut best_overfull: Option<Candidate> = None;

        for &node_index in &active {
            let candidate = &nodes[node_index];

            // An even-pages-only penalty can only end an even page.
            if even_only && candidate.counter % 2 != 0 {
                continue;
            }
            // No chunk may cross an even-only forced penalty; a page that is
            // not allowed to break there must break earlier (at the neutral
            // penalty preceding it), after which the penalty either ends the
            // even page or sits harmlessly at the top of the next chunk.
            if even_only_barriers
                .iter()
                .any(|&barrier| barrier > candidate.breakpoint.index && barrier < position)
            {
                continue;
            }

            let chunk = measures.chunk(list, &candidate.breakpoint, position, false);
            let fit = compute_fit(target, &chunk);
            let flagged_pair = flagged && candidate.flagged;

            if fit.badness.is_finite() {
                let total = candidate.total_demerits
                    + demerits(config, fit.badness, penalty_cost, flagged_pair);
                if best.as_ref().is_none_or(|b| total < b.total_demerits) {
                    best = Some(Candidate {
                        node: node_index,
                        total_demerits: total,
                        ratio: fit.ratio,
                        ratio_infinite: fit.infinite,
                        counter: candidate.counter,
                    });
                }
            } else if forced {
                let total = candidate.total_demerits
                    + demerits(config, OVERFULL_BADNESS, penalty_cost, flagged_pair);
                if best_overfull
                    .as_ref()
                    .is_none_or(|b| total < b.total_demerits)
                {
                    best_overfull = Some(Candidate {
                        node: node_index,
                        total_demerits: total,
                        ratio: fit.ratio,
                        ratio_infinite: fit.infinite,
                        counter: candidate.counter,
                    });
                }
            }
        }

        let chosen = match (best, best_overfull) {
            (Some(best), _) => best,
            (None, Some(overfull)) => {
                log::warn!(
                    "no feasible break before forced break at element {position}; emitting overfull box"
                );
                overfull
            }
            (None, None) => continue,
        };

        let chunk = measures.chunk(
            list,
            &nodes[chosen.node].breakpoint,
            position,
            true,
        );
        let extra = list.chunk_extra_increment(&chunk);

        nodes.push(Node {
            breakpoint: Breakpoint {
                index: position,
                start_index: start_index_after(elements, position),
            },
            previous: Some(chosen.node),
            total_demerits: chosen.total_demerits,
            ratio: chosen.ratio,
            ratio_infinite: chosen.ratio_infinite,
            flagged,
            counter: chosen.counter + 1 + extra,
        });
        let node_index = nodes.len() - 1;

        if forced && !even_only {
            // Nothing may span a forced break.
            active.clear();
        }
        active.push(node_index);
        last_node = node_index;
    }

    // Trace the chosen breaks back from the final one.
    let mut chain = Vec::new();
    let mut index = last_node;
    while let Some(previous) = nodes[index].previous {
        chain.push(index);
        index = previous;
    }
    chain.reverse();

    let total_demerits = nodes[last_node].total_demerits;
    let mut boxes = Vec::with_capacity(chain.len());
    let mut previous = index;
    for node_index in chain {
        let node = &nodes[node_index];
        let begin = &nodes[previous];
        let mut chunk_elements = list.element_sublist(&begin.breakpoint, &node.breakpoint);
        chunk_elements = list.reverse_right_to_left(chunk_elements);
        set_glue(&mut chunk_elements, node.ratio, node.ratio_infinite);
        boxes.push(list.make_output_box(chunk_elements, begin.counter, 0));
        previous = node_index;
    }

    BreakOutcome {
        boxes,
        demerits: total_demerits,
    }
}

/// Evaluate the cumulative demerits of a specific sequence of break
/// positions (element indices, ascending, not including the final
/// end-of-list break). Useful to compare the breaker's choice against other
/// break patterns. Infeasible chunks count at the overfull badness.
pub fn demerits_of_breaks<L: BreakableList + ?Sized>(
    list: &L,
    target: Sp,
    config: &BreakerConfig,
    breaks: &[usize],
) -> f64 {
    let elements = list.elements();
    let measures = Measures::new(list);

    let mut total = 0.0;
    let mut begin = Breakpoint {
        index: 0,
        start_index: 0,
    };
    let mut previous_flagged = false;

    let ends_forced = matches!(
        elements.last(),
        Some(Element::Penalty(penalty)) if penalty.is_forced() && !penalty.is_even_pages_only()
    );
    let final_break = if ends_forced {
        elements.len() - 1
    } else {
        elements.len()
    };

    for &position in breaks.iter().chain(std::iter::once(&final_break)) {
        let (penalty_cost, flagged) = match elements.get(position) {
            Some(Element::Penalty(penalty)) => (penalty.cost(), false),
            Some(Element::Discretionary(discretionary)) => (discretionary.penalty(), true),
            _ => (0, false),
        };
        let chunk = measures.chunk(list, &begin, position, false);
        let fit = compute_fit(target, &chunk);
        let badness = if fit.badness.is_finite() {
            fit.badness
        } else {
            OVERFULL_BADNESS
        };
        total += demerits(config, badness, penalty_cost, flagged && previous_flagged);

        previous_flagged = flagged;
        begin = Breakpoint {
            index: position,
            start_index: start_index_after(elements, position),
        };
    }
    total
}

/// Replace each glue's natural size with its set size under the chosen
/// ratio. When the ratio came from infinite flexibility, only infinite glues
/// move; otherwise only finite ones do.
fn set_glue(elements: &mut [Element], ratio: f64, ratio_infinite: bool) {
    if ratio == 0.0 {
        return;
    }
    for element in elements.iter_mut() {
        if let Element::Glue(glue) = element {
            let flex = if ratio > 0.0 {
                glue.stretch()
            } else {
                glue.shrink()
            };
            if flex.infinite != ratio_infinite || flex.amount == 0 {
                continue;
            }
            let adjust = (ratio * flex.amount as f64).round() as Sp;
            *element = Element::Glue(Glue::fixed(glue.size() + adjust, glue.is_horizontal()));
        }
    }
}

/// Resolve a discretionary to the branch its position in the chunk calls
/// for: post-break when the chunk starts at it, pre-break when the chunk is
/// cut at it, no-break in the middle.
pub(crate) fn resolve_discretionary(
    discretionary: &Discretionary,
    index: usize,
    begin_index: usize,
    end_index: usize,
) -> Element {
    let hbox = if index == begin_index {
        discretionary.post_break()
    } else if index == end_index {
        discretionary.pre_break()
    } else {
        discretionary.no_break()
    };
    Element::HBox(hbox.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Flexibility, HBox, Rule};

    /// A bare list of elements breaking over a fixed axis, for exercising
    /// the dynamic program without the assemblers.
    struct PlainList {
        elements: Vec<Element>,
    }

    impl BreakableList for PlainList {
        type Output = (Vec<Element>, usize);

        fn elements(&self) -> &[Element] {
            &self.elements
        }

        fn element_size(&self, element: &Element) -> Sp {
            element.width()
        }

        fn make_output_box(
            &self,
            elements: Vec<Element>,
            counter: usize,
            _shift: Sp,
        ) -> Self::Output {
            (elements, counter)
        }

        fn element_sublist(&self, begin: &Breakpoint, end: &Breakpoint) -> Vec<Element> {
            let mut out = Vec::new();
            for i in begin.start_index()..=end.index() {
                let Some(element) = self.elements.get(i) else { break };
                if let Element::Discretionary(discretionary) = element {
                    out.push(resolve_discretionary(
                        discretionary,
                        i,
                        begin.start_index(),
                        end.index(),
                    ));
                } else if i < end.index() {
                    out.push(element.clone());
                }
            }
            out
        }

        fn chunk_extra_increment(&self, _chunk: &Chunk) -> usize {
            0
        }
    }

    fn word(width: Sp) -> Element {
        Element::Rule(Rule::new(width, 10, 0))
    }

    fn space(size: Sp, stretch: Sp, shrink: Sp) -> Element {
        Element::Glue(Glue::new(size, stretch, shrink, true))
    }

    fn paragraph_tail() -> Vec<Element> {
        vec![
            Element::Penalty(Penalty::new(Penalty::INFINITY)),
            Element::Glue(Glue::with_flex(
                0,
                Flexibility::infinite(65_536),
                Flexibility::NONE,
                true,
            )),
            Element::Penalty(Penalty::new(-Penalty::INFINITY)),
        ]
    }

    /// `count` words of `width` separated by stretchable spaces, ending with
    /// the usual paragraph tail.
    fn words(count: usize, width: Sp, space_size: Sp, stretch: Sp, shrink: Sp) -> Vec<Element> {
        let mut elements = Vec::new();
        for i in 0..count {
            if i > 0 {
                elements.push(space(space_size, stretch, shrink));
            }
            elements.push(word(width));
        }
        elements.extend(paragraph_tail());
        elements
    }

    #[test]
    fn everything_fits_on_one_line() {
        let list = PlainList {
            elements: words(3, 10, 5, 3, 1),
        };
        let outcome = break_list(&list, 1_000, &BreakerConfig::default(), 1);
        assert_eq!(outcome.boxes.len(), 1);
        assert_eq!(outcome.boxes[0].1, 1);
    }

    #[test]
    fn set_lines_sum_to_the_target() {
        let target = 100;
        let list = PlainList {
            elements: words(20, 10, 2, 1, 0),
        };
        let outcome = break_list(&list, target, &BreakerConfig::default(), 1);
        assert!(outcome.boxes.len() > 1);
        for (line, _) in &outcome.boxes {
            let natural: Sp = line.iter().map(Element::width).sum();
            let glue_count = line
                .iter()
                .filter(|element| matches!(element, Element::Glue(_)))
                .count() as Sp;
            // Glue is set per element with rounding, so allow one sp each.
            assert!(
                (natural - target).abs() <= glue_count.max(1),
                "line natural {natural} vs target {target}"
            );
        }
    }

    #[test]
    fn beats_greedy_packing() {
        let target = 100;
        let list = PlainList {
            elements: words(20, 10, 2, 1, 0),
        };
        let config = BreakerConfig::default();
        let outcome = break_list(&list, target, &config, 1);

        // First-fit greedy: break at the last space that still fits.
        let mut greedy_breaks = Vec::new();
        let mut line_width: Sp = 0;
        for (i, element) in list.elements().iter().enumerate() {
            match element {
                Element::Glue(glue) => {
                    line_width += glue.size();
                }
                other => {
                    if line_width + other.width() > target
                        && matches!(list.elements().get(i - 1), Some(Element::Glue(_)))
                    {
                        greedy_breaks.push(i - 1);
                        line_width = other.width();
                    } else {
                        line_width += other.width();
                    }
                }
            }
        }
        let greedy = demerits_of_breaks(&list, target, &config, &greedy_breaks);

        assert!(
            outcome.demerits <= greedy,
            "breaker {} should be no worse than greedy {}",
            outcome.demerits,
            greedy
        );
    }

    #[test]
    fn forced_break_ends_a_chunk() {
        let mut elements = vec![word(10)];
        elements.push(Element::Glue(Glue::infinite(true)));
        elements.push(Element::Penalty(Penalty::new(-Penalty::INFINITY)));
        elements.push(word(20));
        elements.extend(paragraph_tail());
        let list = PlainList { elements };

        let outcome = break_list(&list, 100, &BreakerConfig::default(), 1);
        assert_eq!(outcome.boxes.len(), 2);
        assert_eq!(outcome.boxes[0].0[0].width(), 10);
        assert_eq!(outcome.boxes[1].0[0].width(), 20);
        assert_eq!(outcome.boxes[1].1, 2);
    }

    #[test]
    fn discretionary_break_materializes_pre_and_post() {
        // "word-break" as word(40) disc(-,..) word(40) with a hyphen 5 wide.
        let hyphen = HBox::new(vec![word(5)]);
        let empty = HBox::new(Vec::new());
        let mut elements = vec![
            word(40),
            Element::Discretionary(Discretionary::new(
                hyphen,
                empty.clone(),
                empty,
                Discretionary::HYPHEN_PENALTY,
            )),
            word(40),
        ];
        elements.extend(paragraph_tail());
        let list = PlainList { elements };

        // A 50-wide measure forces the discretionary break.
        let outcome = break_list(&list, 50, &BreakerConfig::default(), 1);
        assert_eq!(outcome.boxes.len(), 2);
        let first = &outcome.boxes[0].0;
        // word + pre-break hyphen box.
        assert_eq!(first.len(), 2);
        assert_eq!(first.iter().map(Element::width).sum::<Sp>(), 45);
    }

    #[test]
    fn overfull_is_emitted_when_nothing_fits() {
        let list = PlainList {
            elements: words(1, 500, 2, 1, 0),
        };
        let outcome = break_list(&list, 100, &BreakerConfig::default(), 1);
        assert_eq!(outcome.boxes.len(), 1);
        assert!(outcome.demerits >= OVERFULL_BADNESS.powi(2));
    }

    #[test]
    fn flagged_pairs_cost_extra() {
        let hyphen = || HBox::new(vec![word(5)]);
        let empty = || HBox::new(Vec::new());
        let disc = || {
            Element::Discretionary(Discretionary::new(
                hyphen(),
                empty(),
                empty(),
                Discretionary::HYPHEN_PENALTY,
            ))
        };
        let mut elements = vec![word(40), disc(), word(40), disc(), word(40)];
        elements.extend(paragraph_tail());
        let list = PlainList { elements };
        let config = BreakerConfig::default();

        // Breaking at both discretionaries makes a flagged pair.
        let both = demerits_of_breaks(&list, 50, &config, &[1, 3]);
        let without_pair_cost = {
            let mut config = config.clone();
            config.flagged_pair_demerits = 0.0;
            demerits_of_breaks(&list, 50, &config, &[1, 3])
        };
        assert!((both - without_pair_cost - config.flagged_pair_demerits).abs() < 1e-6);
    }
}
