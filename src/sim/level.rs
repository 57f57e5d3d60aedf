//! Level specs and the procedural entity generator
//!
//! Each kind is laid out independently by walking a cursor along x with a
//! randomized gap, so entity ids come out grouped by kind (platforms first,
//! then obstacles, collectibles, enemies, weapons). Only id uniqueness is a
//! contract; the id-to-kind mapping is not.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Entity, EntityKind, ObstacleKind};
use crate::consts::*;
use crate::theme::{LevelTheme, Palette};

/// Generator parameters plus the fixed cosmetic defaults for one level slot
#[derive(Debug, Clone, Copy)]
pub struct LevelSpec {
    pub name: &'static str,
    pub platforms: u32,
    pub obstacles: u32,
    pub collectibles: u32,
    pub enemies: u32,
    pub weapons: u32,
    /// Sub-kinds the obstacle roll may pick from; empty means no obstacles
    pub obstacle_kinds: &'static [ObstacleKind],
    pub background: &'static str,
    pub ground: &'static str,
}

/// The three selectable levels, in difficulty order
pub const PREDEFINED_LEVELS: [LevelSpec; 3] = [
    LevelSpec {
        name: "Cyber City Sprint",
        platforms: 5,
        obstacles: 15,
        collectibles: 10,
        enemies: 5,
        weapons: 1,
        obstacle_kinds: &[ObstacleKind::Box],
        background: "#0c4a6e",
        ground: "#4b5563",
    },
    LevelSpec {
        name: "Neon Night Run",
        platforms: 8,
        obstacles: 25,
        collectibles: 15,
        enemies: 8,
        weapons: 2,
        obstacle_kinds: &[ObstacleKind::Box, ObstacleKind::TallBox],
        background: "#3730a3",
        ground: "#6b21a8",
    },
    LevelSpec {
        name: "Digital Fortress",
        platforms: 12,
        obstacles: 35,
        collectibles: 20,
        enemies: 12,
        weapons: 3,
        obstacle_kinds: &[ObstacleKind::Box, ObstacleKind::TallBox, ObstacleKind::Spike],
        background: "#7f1d1d",
        ground: "#1f2937",
    },
];

/// Object layout used for custom-themed runs that arrive without one
pub const DEFAULT_LAYOUT: LevelSpec = PREDEFINED_LEVELS[0];

/// A ready-to-run level: a name, a generated entity layout sorted by x, and
/// the resolved presentation palette (pass-through only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub entities: Vec<Entity>,
    pub palette: Palette,
}

impl Level {
    /// Build one of the predefined levels (1-based index)
    pub fn predefined(index: usize, rng: &mut impl Rng) -> Option<Self> {
        let spec = PREDEFINED_LEVELS.get(index.checked_sub(1)?)?;
        let entities = generate_entities(spec, rng);
        log::info!("generated '{}': {} entities", spec.name, entities.len());
        Some(Self {
            name: spec.name.to_string(),
            entities,
            palette: Palette::for_level(spec.background, spec.ground),
        })
    }

    /// Build a custom level: default object layout, colors from the supplied
    /// theme. A missing theme must not block gameplay, so `None` falls back
    /// to the built-in custom palette.
    pub fn custom(theme: Option<&LevelTheme>, rng: &mut impl Rng) -> Self {
        let entities = generate_entities(&DEFAULT_LAYOUT, rng);
        match theme {
            Some(theme) => Self {
                name: theme.level_name.clone(),
                entities,
                palette: Palette::from_theme(theme),
            },
            None => Self {
                name: "Custom Level".to_string(),
                entities,
                palette: Palette::custom_default(),
            },
        }
    }

    /// Apply an optional full theme override, keeping the layout
    pub fn with_theme(mut self, theme: Option<&LevelTheme>) -> Self {
        if let Some(theme) = theme {
            self.name = theme.level_name.clone();
            self.palette = Palette::from_theme(theme);
        }
        self
    }
}

/// Generate the entity layout for a spec.
///
/// Deterministic in shape, randomized in parameters: each kind advances its
/// own cursor with a per-kind gap. Ids are assigned sequentially from 0 in
/// generation order and the final result is sorted ascending by x.
pub fn generate_entities(spec: &LevelSpec, rng: &mut impl Rng) -> Vec<Entity> {
    let mut entities: Vec<Entity> = Vec::new();
    let mut next_id = 0u32;
    let mut push = |entities: &mut Vec<Entity>, pos: Vec2, w: f32, h: f32, kind: EntityKind| {
        entities.push(Entity {
            id: next_id,
            pos,
            width: w,
            height: h,
            kind,
        });
        next_id += 1;
    };

    // Platforms: 80-180 units above the ground line
    let mut cursor = 500.0;
    for _ in 0..spec.platforms {
        cursor += 350.0 + rng.random_range(0.0..250.0);
        let width = rng.random_range(PLATFORM_MIN_WIDTH..PLATFORM_MAX_WIDTH);
        let y = GROUND_Y - rng.random_range(80.0..180.0);
        push(
            &mut entities,
            Vec2::new(cursor, y),
            width,
            PLATFORM_HEIGHT,
            EntityKind::Platform,
        );
    }

    // Obstacles: resting on the ground line, spaced wider than anything else
    if !spec.obstacle_kinds.is_empty() {
        cursor = 500.0;
        for _ in 0..spec.obstacles {
            cursor += 400.0 + rng.random_range(0.0..400.0);
            let kind = spec.obstacle_kinds[rng.random_range(0..spec.obstacle_kinds.len())];
            let height = match kind {
                ObstacleKind::Box => rng.random_range(OBSTACLE_MIN_HEIGHT..OBSTACLE_MAX_HEIGHT),
                ObstacleKind::TallBox => {
                    rng.random_range(OBSTACLE_MIN_HEIGHT..OBSTACLE_MAX_HEIGHT) * TALL_BOX_FACTOR
                }
                // Spikes have an equilateral silhouette
                ObstacleKind::Spike => OBSTACLE_WIDTH,
            };
            push(
                &mut entities,
                Vec2::new(cursor, GROUND_Y - height),
                OBSTACLE_WIDTH,
                height,
                EntityKind::Obstacle { kind },
            );
        }
    }

    // Collectibles: floating in a band above ground, independent of platforms
    cursor = 600.0;
    for _ in 0..spec.collectibles {
        cursor += 300.0 + rng.random_range(0.0..300.0);
        let y = GROUND_Y - COLLECTIBLE_SIZE - rng.random_range(50.0..200.0);
        push(
            &mut entities,
            Vec2::new(cursor, y),
            COLLECTIBLE_SIZE,
            COLLECTIBLE_SIZE,
            EntityKind::Collectible,
        );
    }

    // Enemies: 60% on a ground band, otherwise centered on a random platform
    let platforms: Vec<(Vec2, f32)> = entities
        .iter()
        .filter(|e| e.is_platform())
        .map(|e| (e.pos, e.width))
        .collect();
    for _ in 0..spec.enemies {
        let vx = ENEMY_SPEED * if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let pos = if rng.random_bool(0.6) || platforms.is_empty() {
            let x = 800.0 + rng.random_range(0.0..LEVEL_LENGTH - 1000.0);
            Vec2::new(x, GROUND_Y - ENEMY_HEIGHT)
        } else {
            let (platform_pos, platform_width) = platforms[rng.random_range(0..platforms.len())];
            Vec2::new(
                platform_pos.x + platform_width / 2.0,
                platform_pos.y - ENEMY_HEIGHT,
            )
        };
        push(
            &mut entities,
            pos,
            ENEMY_WIDTH,
            ENEMY_HEIGHT,
            EntityKind::Enemy { vx },
        );
    }

    // Weapons: evenly spaced across the level with jitter
    cursor = 1000.0;
    for _ in 0..spec.weapons {
        cursor += (LEVEL_LENGTH / (spec.weapons + 1) as f32) * rng.random_range(0.8..1.2);
        let y = GROUND_Y - WEAPON_HEIGHT - rng.random_range(20.0..120.0);
        push(
            &mut entities,
            Vec2::new(cursor, y),
            WEAPON_WIDTH,
            WEAPON_HEIGHT,
            EntityKind::Weapon,
        );
    }

    entities.sort_by(|a, b| a.pos.x.total_cmp(&b.pos.x));
    entities
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    #[test]
    fn test_output_sorted_and_ids_unique() {
        let mut rng = Pcg32::seed_from_u64(42);
        for spec in &PREDEFINED_LEVELS {
            let entities = generate_entities(spec, &mut rng);
            for pair in entities.windows(2) {
                assert!(pair[0].pos.x <= pair[1].pos.x, "not sorted by x");
            }
            let ids: HashSet<u32> = entities.iter().map(|e| e.id).collect();
            assert_eq!(ids.len(), entities.len(), "duplicate entity id");
        }
    }

    #[test]
    fn test_counts_follow_level_spec() {
        let mut rng = Pcg32::seed_from_u64(7);
        let spec = &PREDEFINED_LEVELS[2];
        let entities = generate_entities(spec, &mut rng);
        let count = |f: fn(&Entity) -> bool| entities.iter().filter(|e| f(e)).count() as u32;
        assert_eq!(count(Entity::is_platform), spec.platforms);
        assert_eq!(count(Entity::is_enemy), spec.enemies);
        assert_eq!(
            count(|e| matches!(e.kind, EntityKind::Obstacle { .. })),
            spec.obstacles
        );
        assert_eq!(
            count(|e| matches!(e.kind, EntityKind::Collectible)),
            spec.collectibles
        );
        assert_eq!(count(|e| matches!(e.kind, EntityKind::Weapon)), spec.weapons);
    }

    #[test]
    fn test_zero_counts_produce_empty_layout() {
        let spec = LevelSpec {
            name: "empty",
            platforms: 0,
            obstacles: 0,
            collectibles: 0,
            enemies: 0,
            weapons: 0,
            obstacle_kinds: &[],
            background: "#000000",
            ground: "#000000",
        };
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(generate_entities(&spec, &mut rng).is_empty());
    }

    #[test]
    fn test_empty_obstacle_kinds_skips_obstacles() {
        let spec = LevelSpec {
            obstacle_kinds: &[],
            ..PREDEFINED_LEVELS[0]
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let entities = generate_entities(&spec, &mut rng);
        assert!(
            entities
                .iter()
                .all(|e| !matches!(e.kind, EntityKind::Obstacle { .. }))
        );
    }

    #[test]
    fn test_obstacle_silhouettes() {
        let mut rng = Pcg32::seed_from_u64(99);
        let entities = generate_entities(&PREDEFINED_LEVELS[2], &mut rng);
        for e in &entities {
            if let EntityKind::Obstacle { kind } = e.kind {
                // All obstacles rest on the ground line
                assert!((e.pos.y + e.height - GROUND_Y).abs() < 1e-3);
                match kind {
                    ObstacleKind::Box => {
                        assert!(e.height >= OBSTACLE_MIN_HEIGHT && e.height <= OBSTACLE_MAX_HEIGHT);
                    }
                    ObstacleKind::TallBox => {
                        assert!(e.height >= OBSTACLE_MIN_HEIGHT * TALL_BOX_FACTOR);
                        assert!(e.height <= OBSTACLE_MAX_HEIGHT * TALL_BOX_FACTOR);
                    }
                    ObstacleKind::Spike => assert_eq!(e.height, OBSTACLE_WIDTH),
                }
            }
        }
    }

    #[test]
    fn test_enemies_patrol_at_fixed_speed() {
        let mut rng = Pcg32::seed_from_u64(17);
        let entities = generate_entities(&PREDEFINED_LEVELS[1], &mut rng);
        for e in &entities {
            if let EntityKind::Enemy { vx } = e.kind {
                assert_eq!(vx.abs(), ENEMY_SPEED);
            }
        }
    }

    #[test]
    fn test_predefined_index_bounds() {
        let mut rng = Pcg32::seed_from_u64(5);
        assert!(Level::predefined(0, &mut rng).is_none());
        assert!(Level::predefined(1, &mut rng).is_some());
        assert!(Level::predefined(3, &mut rng).is_some());
        assert!(Level::predefined(4, &mut rng).is_none());
    }

    #[test]
    fn test_theme_override_keeps_layout() {
        let theme = crate::theme::LevelTheme {
            level_name: "Lava Dash".to_string(),
            background_color: "#200000".to_string(),
            ground_color: "#401010".to_string(),
            platform_color: "#802020".to_string(),
            player_color: "#00ff00".to_string(),
            obstacle_color: "#ff0000".to_string(),
            collectible_color: "#ffff00".to_string(),
            enemy_color: "#ff8800".to_string(),
            description: "Hot.".to_string(),
        };
        let mut rng = Pcg32::seed_from_u64(23);
        let level = Level::predefined(1, &mut rng).unwrap();
        let entities_before = level.entities.clone();

        let themed = level.with_theme(Some(&theme));
        assert_eq!(themed.name, "Lava Dash");
        assert_eq!(themed.palette.background, "#200000");
        assert_eq!(themed.palette.player.as_deref(), Some("#00ff00"));
        assert_eq!(themed.entities, entities_before);
    }

    #[test]
    fn test_custom_level_falls_back_without_theme() {
        let mut rng = Pcg32::seed_from_u64(11);
        let level = Level::custom(None, &mut rng);
        assert_eq!(level.name, "Custom Level");
        assert!(!level.entities.is_empty());
        assert_eq!(level.palette.background, "#111827");
    }
}
