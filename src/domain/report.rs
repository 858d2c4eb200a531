use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{Occupancy, ProjectTag, Room, RoomNumber};

/// Length of the window, ending on the report date, in which a worker's
/// entry counts as recent.
pub const RECENT_ENTRY_DAYS: u64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BedTotals {
    #[serde(rename = "totalRooms")]
    pub total_rooms: u32,
    #[serde(rename = "totalCapacity")]
    pub total_capacity: u32,
    #[serde(rename = "occupiedBeds")]
    pub occupied_beds: u32,
    #[serde(rename = "availableBeds")]
    pub available_beds: u32,
    /// Percentage in `[0, 100]`; zero when there are no beds.
    #[serde(rename = "occupancyRate")]
    pub occupancy_rate: f64,
}

impl BedTotals {
    fn of<'a>(rooms: impl IntoIterator<Item = &'a Room>) -> Self {
        let (total_rooms, total_capacity, occupied_beds) = rooms
            .into_iter()
            .fold((0, 0, 0), |(count, capacity, occupied), room| {
                (
                    count + 1,
                    capacity + room.capacity.value_of(),
                    occupied + room.occupied_beds(),
                )
            });

        Self {
            total_rooms,
            total_capacity,
            occupied_beds,
            available_beds: total_capacity.saturating_sub(occupied_beds),
            occupancy_rate: percentage(occupied_beds, total_capacity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectStats {
    pub project: ProjectTag,
    #[serde(flatten)]
    pub totals: BedTotals,
    /// Occupants whose own project matches the room's project.
    #[serde(rename = "sameProjectWorkers")]
    pub same_project_workers: u32,
    /// Occupants declaring a different project than the room's.
    #[serde(rename = "otherProjectWorkers")]
    pub other_project_workers: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampStats {
    #[serde(flatten)]
    pub totals: BedTotals,
    #[serde(rename = "totalWorkers")]
    pub total_workers: u32,
    #[serde(rename = "unassignedWorkers")]
    pub unassigned_workers: u32,
    #[serde(rename = "averageOccupancyPerRoom")]
    pub average_occupancy_per_room: f64,
    /// Mean of the per-room occupancy percentages, every room weighted
    /// equally regardless of size.
    #[serde(rename = "averageRoomOccupancyRate")]
    pub average_room_occupancy_rate: f64,
    #[serde(rename = "mostOccupiedRoom")]
    pub most_occupied_room: Option<RoomNumber>,
    #[serde(rename = "leastOccupiedRoom")]
    pub least_occupied_room: Option<RoomNumber>,
    #[serde(rename = "recentWorkers")]
    pub recent_workers: u32,
    pub projects: Vec<ProjectStats>,
}

impl CampStats {
    /// Derives every figure from the snapshot; nothing is cached.
    pub fn compute(occupancy: &Occupancy, today: NaiveDate) -> Self {
        let rooms = occupancy.rooms();
        let totals = BedTotals::of(rooms);

        let (average_occupancy_per_room, average_room_occupancy_rate) =
            if totals.total_rooms == 0 {
                (0.0, 0.0)
            } else {
                let rooms_count = f64::from(totals.total_rooms);
                let ratio_sum: f64 =
                    rooms.iter().map(|room| room.occupancy()).sum();
                (
                    f64::from(totals.occupied_beds) / rooms_count,
                    ratio_sum / rooms_count * 100.0,
                )
            };

        let window_start = today
            .checked_sub_days(Days::new(RECENT_ENTRY_DAYS))
            .unwrap_or(NaiveDate::MIN);
        let recent_workers = rooms
            .iter()
            .filter_map(|room| occupancy.workers_of(&room.id).ok())
            .flatten()
            .filter(|w| w.entry_date >= window_start && w.entry_date <= today)
            .count() as u32;

        Self {
            total_workers: totals.occupied_beds,
            unassigned_workers: occupancy.unassigned_workers().count() as u32,
            average_occupancy_per_room,
            average_room_occupancy_rate,
            most_occupied_room: extremal_room(rooms, |candidate, best| {
                candidate > best
            }),
            least_occupied_room: extremal_room(rooms, |candidate, best| {
                candidate < best
            }),
            recent_workers,
            projects: project_breakdown(occupancy),
            totals,
        }
    }
}

/// Room whose occupancy ratio beats every earlier one; ties keep the room
/// seen first.
fn extremal_room(
    rooms: &[Room],
    beats: impl Fn(f64, f64) -> bool,
) -> Option<RoomNumber> {
    let mut best: Option<&Room> = None;
    for room in rooms {
        let replace = match best {
            Some(current) => beats(room.occupancy(), current.occupancy()),
            None => true,
        };
        if replace {
            best = Some(room);
        }
    }
    best.map(|room| room.number.clone())
}

fn project_breakdown(occupancy: &Occupancy) -> Vec<ProjectStats> {
    let mut projects: Vec<&ProjectTag> = Vec::new();
    for room in occupancy.rooms() {
        if !projects.contains(&&room.project) {
            projects.push(&room.project);
        }
    }

    projects
        .into_iter()
        .map(|project| {
            let rooms: Vec<&Room> = occupancy
                .rooms()
                .iter()
                .filter(|room| &room.project == project)
                .collect();

            let (same, other) = rooms
                .iter()
                .filter_map(|room| occupancy.workers_of(&room.id).ok())
                .flatten()
                .fold((0, 0), |(same, other), worker| {
                    if &worker.project == project {
                        (same + 1, other)
                    } else {
                        (same, other + 1)
                    }
                });

            ProjectStats {
                project: project.clone(),
                totals: BedTotals::of(rooms),
                same_project_workers: same,
                other_project_workers: other,
            }
        })
        .collect()
}

fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    f64::from(part) / f64::from(whole) * 100.0
}
