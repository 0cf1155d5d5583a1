//! Backtracking seat assignment.
//!
//! The solver reads a [`SeatingPlan`] snapshot and returns a desk to student
//! mapping; it never mutates the plan. Locked desks seed the mapping as
//! fixed points. Remaining students are drawn from gender queues, each
//! candidate desk is checked against the separation rules of its seated
//! neighbors, and dead ends are undone. The first complete arrangement found
//! is returned; the placement score only orders candidates.

use crate::adjacency::{AdjacencyMap, DEFAULT_PROXIMITY_THRESHOLD};
use crate::constraints::can_sit_together;
use crate::error::{Result, SeatplanError};
use crate::models::{DeskId, Gender, SeatingPlan, SeparationRule};
use crate::scoring::placement_score;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet, VecDeque};

/// Default cap on candidate placements tried in a single solve
pub const DEFAULT_SEARCH_LIMIT: u64 = 1_000_000;

/// Knobs for a single auto-assign run
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOptions {
    /// Try desks in layout order instead of a shuffled order
    pub fill_from_front: bool,

    /// Prefer seating students next to the opposite gender
    pub alternate_gender: bool,

    /// Center distance under which ungrouped desks are neighbors
    pub proximity_threshold: f64,

    /// Give up after this many candidate placements; `None` searches exhaustively
    pub search_limit: Option<u64>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            fill_from_front: false,
            alternate_gender: false,
            proximity_threshold: DEFAULT_PROXIMITY_THRESHOLD,
            search_limit: Some(DEFAULT_SEARCH_LIMIT),
        }
    }
}

/// Desk to student mapping that remembers insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assignment {
    order: Vec<DeskId>,
    seats: HashMap<DeskId, String>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat a student. Re-seating a desk keeps its original position in the order.
    pub fn insert(&mut self, desk: DeskId, student: String) {
        if self.seats.insert(desk, student).is_none() {
            self.order.push(desk);
        }
    }

    pub fn remove(&mut self, desk: DeskId) -> Option<String> {
        let student = self.seats.remove(&desk)?;
        if let Some(pos) = self.order.iter().rposition(|d| *d == desk) {
            self.order.remove(pos);
        }
        Some(student)
    }

    pub fn get(&self, desk: DeskId) -> Option<&str> {
        self.seats.get(&desk).map(String::as_str)
    }

    pub fn contains(&self, desk: DeskId) -> bool {
        self.seats.contains_key(&desk)
    }

    /// Most recently seated student
    pub fn last_student(&self) -> Option<&str> {
        self.order.last().and_then(|desk| self.get(*desk))
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    /// Seats in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (DeskId, &str)> + '_ {
        self.order.iter().filter_map(|desk| self.get(*desk).map(|name| (*desk, name)))
    }
}

/// A complete arrangement produced by [`solve`]
#[derive(Debug, Clone)]
pub struct Solution {
    /// Locked seats plus every newly placed student
    pub assignment: Assignment,

    /// Students placed by the search
    pub placed: usize,

    /// Seats held by locked desks
    pub locked: usize,

    /// Candidate placements tried
    pub explored: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Queue {
    Males,
    Females,
    Others,
}

#[derive(Debug, Default)]
struct Queues {
    males: VecDeque<String>,
    females: VecDeque<String>,
    others: VecDeque<String>,
}

impl Queues {
    fn get_mut(&mut self, queue: Queue) -> &mut VecDeque<String> {
        match queue {
            Queue::Males => &mut self.males,
            Queue::Females => &mut self.females,
            Queue::Others => &mut self.others,
        }
    }

    fn is_empty(&self) -> bool {
        self.males.is_empty() && self.females.is_empty() && self.others.is_empty()
    }

    /// Pick the queue the next student is drawn from.
    ///
    /// With alternation on, follow a male with a female and vice versa while
    /// the other queue has students. Otherwise draw from the longer of the
    /// two gendered queues, and only then from students with no gender.
    fn next(&self, last: Option<Gender>, alternate_gender: bool) -> Queue {
        if alternate_gender {
            match last {
                Some(Gender::Male) if !self.females.is_empty() => return Queue::Females,
                Some(Gender::Female) if !self.males.is_empty() => return Queue::Males,
                _ => {}
            }
        }
        if self.males.is_empty() && self.females.is_empty() {
            Queue::Others
        } else if self.males.len() >= self.females.len() {
            Queue::Males
        } else {
            Queue::Females
        }
    }
}

struct Search<'a> {
    adjacency: AdjacencyMap,
    rules: &'a [SeparationRule],
    genders: HashMap<String, Gender>,
    desk_order: Vec<DeskId>,
    alternate_gender: bool,
    search_limit: Option<u64>,
    explored: u64,
    limit_reached: bool,
}

impl Search<'_> {
    fn place(&mut self, assignment: &mut Assignment, queues: &mut Queues) -> bool {
        if queues.is_empty() {
            return true;
        }

        let last = assignment.last_student().and_then(|name| self.genders.get(name)).copied();
        let queue = queues.next(last, self.alternate_gender);
        let Some(student) = queues.get_mut(queue).pop_front() else {
            return false;
        };
        let gender = self.genders.get(&student).copied();

        let mut candidates: Vec<_> = self
            .desk_order
            .iter()
            .copied()
            .filter(|desk| !assignment.contains(*desk))
            .map(|desk| {
                let score = placement_score(
                    desk,
                    gender,
                    assignment,
                    &self.adjacency,
                    &self.genders,
                    self.alternate_gender,
                );
                (desk, score)
            })
            .collect();
        candidates.sort_by(|a, b| b.1.cmp(&a.1));

        for (desk, _) in candidates {
            if let Some(limit) = self.search_limit {
                if self.explored >= limit {
                    self.limit_reached = true;
                    break;
                }
            }
            self.explored += 1;

            let compatible = self.adjacency.neighbors(desk).all(|neighbor| {
                can_sit_together(Some(student.as_str()), assignment.get(neighbor), self.rules)
            });
            if !compatible {
                continue;
            }

            assignment.insert(desk, student.clone());
            if self.place(assignment, queues) {
                return true;
            }
            assignment.remove(desk);

            if self.limit_reached {
                break;
            }
        }

        queues.get_mut(queue).push_front(student);
        false
    }
}

/// Find a seat for every student not already on a locked desk.
///
/// Students are shuffled with `rng` before being split into gender queues;
/// desks are shuffled too unless `fill_from_front` is set. Seed the rng to
/// get a reproducible arrangement.
///
/// Fails fast with [`SeatplanError::NotEnoughDesks`] when there are more
/// students to place than free desks, and with
/// [`SeatplanError::AssignmentFailed`] when no arrangement satisfies the
/// separation rules.
pub fn solve<R: Rng + ?Sized>(
    plan: &SeatingPlan,
    options: &SolveOptions,
    rng: &mut R,
) -> Result<Solution> {
    let mut assignment = Assignment::new();
    for desk in plan.desks.iter().filter(|d| d.is_locked) {
        if let Some(student) = &desk.student {
            assignment.insert(desk.id, student.clone());
        }
    }
    let locked = assignment.len();

    let locked_names: HashSet<&str> = assignment.iter().map(|(_, name)| name).collect();
    let mut to_place: Vec<_> =
        plan.students.iter().filter(|s| !locked_names.contains(s.name.as_str())).collect();

    let mut desk_order: Vec<DeskId> = plan.available_desks().map(|d| d.id).collect();

    if to_place.len() > desk_order.len() {
        tracing::info!(
            students = to_place.len(),
            desks = desk_order.len(),
            "Not enough desks for auto-assign"
        );
        return Err(SeatplanError::NotEnoughDesks {
            needed: to_place.len(),
            available: desk_order.len(),
        });
    }

    to_place.shuffle(rng);
    if !options.fill_from_front {
        desk_order.shuffle(rng);
    }

    let mut queues = Queues::default();
    for student in &to_place {
        let queue = match student.gender {
            Some(Gender::Male) => &mut queues.males,
            Some(Gender::Female) => &mut queues.females,
            None => &mut queues.others,
        };
        queue.push_back(student.name.clone());
    }

    let genders: HashMap<String, Gender> = plan
        .students
        .iter()
        .filter_map(|s| s.gender.map(|g| (s.name.clone(), g)))
        .collect();

    tracing::debug!(
        students = to_place.len(),
        desks = desk_order.len(),
        locked,
        rules = plan.rules.len(),
        "Starting seat search"
    );

    let mut search = Search {
        adjacency: AdjacencyMap::build(&plan.desks, options.proximity_threshold),
        rules: &plan.rules,
        genders,
        desk_order,
        alternate_gender: options.alternate_gender,
        search_limit: options.search_limit.filter(|limit| *limit > 0),
        explored: 0,
        limit_reached: false,
    };

    if !search.place(&mut assignment, &mut queues) {
        tracing::info!(
            explored = search.explored,
            limit_reached = search.limit_reached,
            "No valid seating arrangement found"
        );
        return Err(SeatplanError::AssignmentFailed {
            students: to_place.len(),
            desks: search.desk_order.len(),
            limit_reached: search.limit_reached,
        });
    }

    tracing::info!(
        placed = to_place.len(),
        locked,
        explored = search.explored,
        "Seat search succeeded"
    );

    Ok(Solution {
        assignment,
        placed: to_place.len(),
        locked,
        explored: search.explored,
    })
}
