//! A minimal transporter crew: one actor per segment, waiting at the
//! segment's center and moving one tile per tick.

use anyhow::{Context, Result};
use tracing::debug;

use lg_core::{ActorId, ResourceId, SegmentId, TilePos};
use lg_router::{ActorRole, Placement};
use lg_sim::{TickSummary, World};

#[derive(Copy, Clone, Debug)]
enum Task {
    Idle,
    /// Walking to `at` to pick `resource` up.
    Fetch { resource: ResourceId, at: TilePos, eta: u64 },
    /// Carrying `resource` to `to`.
    Carry { resource: ResourceId, to: TilePos, eta: u64 },
}

struct Transporter {
    actor:   ActorId,
    segment: SegmentId,
    pos:     TilePos,
    task:    Task,
}

impl Transporter {
    /// Ticks needed to walk from the current tile to `to`.
    fn travel(&self, world: &World, to: TilePos) -> Result<u64> {
        let path = world.shortest_path(self.segment, self.pos, to)?;
        Ok(path.len().saturating_sub(1) as u64)
    }

    fn step(&mut self, world: &mut World) -> Result<Option<Placement>> {
        match self.task {
            Task::Idle => {
                if let Some(resource) = world.claim_next_resource(self.segment, self.actor)? {
                    let at = world
                        .router()
                        .resource(resource)
                        .context("claimed resource exists")?
                        .pos;
                    let eta = self.travel(world, at)?;
                    self.task = Task::Fetch { resource, at, eta };
                }
            }
            Task::Fetch { resource, at, eta } if eta > 0 => {
                self.task = Task::Fetch { resource, at, eta: eta - 1 };
            }
            Task::Fetch { resource, at, .. } => {
                self.pos = at;
                world.on_actor_started_picking_up(resource, self.actor)?;
                let to = world
                    .router()
                    .resource(resource)
                    .and_then(|r| r.current_leg())
                    .context("picked-up resource has a leg")?
                    .waypoint;
                let eta = self.travel(world, to)?;
                self.task = Task::Carry { resource, to, eta };
            }
            Task::Carry { resource, to, eta } if eta > 0 => {
                self.task = Task::Carry { resource, to, eta: eta - 1 };
            }
            Task::Carry { resource, to, .. } => {
                self.pos = to;
                self.task = Task::Idle;
                let placed = world.on_actor_placed_resource(to, Some(self.segment), resource)?;
                return Ok(Some(placed));
            }
        }
        Ok(None)
    }

    /// The route of the resource this actor works on was cut.
    fn interrupt(&mut self, world: &mut World, role: ActorRole) -> Result<()> {
        if let (Task::Carry { resource, .. }, ActorRole::Carrier) = (self.task, role) {
            let placed = world.on_actor_placed_resource(self.pos, None, resource)?;
            debug!(actor = %self.actor, %resource, pos = %self.pos, ?placed, "carried resource put down");
        }
        self.task = Task::Idle;
        Ok(())
    }
}

#[derive(Default)]
pub struct Crew {
    transporters: Vec<Transporter>,
    hired:        u32,
}

impl Crew {
    pub fn headcount(&self) -> usize {
        self.transporters.len()
    }

    /// React to a finished tick: handle interruptions, retire actors of
    /// deleted segments and hire one for every new segment.
    pub fn sync(&mut self, world: &mut World, summary: &TickSummary) -> Result<()> {
        for interruption in &summary.interruptions {
            if let Some(t) = self.transporters.iter_mut().find(|t| t.actor == interruption.actor) {
                t.interrupt(world, interruption.role)?;
            }
        }
        self.transporters.retain(|t| world.segments().contains(t.segment));

        let unstaffed: Vec<SegmentId> = world
            .segments()
            .ids()
            .filter(|id| !self.transporters.iter().any(|t| t.segment == *id))
            .collect();
        for segment in unstaffed {
            let pos = *world
                .segment_centers(segment)?
                .first()
                .context("a segment has at least one center")?;
            let actor = ActorId(self.hired);
            self.hired += 1;
            debug!(%actor, %segment, %pos, "transporter hired");
            self.transporters.push(Transporter { actor, segment, pos, task: Task::Idle });
        }
        Ok(())
    }

    /// Advance every transporter by one tick.
    pub fn step(&mut self, world: &mut World) -> Result<Vec<Placement>> {
        let mut placements = Vec::new();
        for t in &mut self.transporters {
            if let Some(placed) = t.step(world)? {
                placements.push(placed);
            }
        }
        Ok(placements)
    }
}
