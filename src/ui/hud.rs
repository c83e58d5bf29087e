//! Dashboard panels: counters, active detections, alert log, detections table

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

use super::components::{
    LoopResource, PanelText, SimWorldResource, StatText, FEED_LEFT, FEED_TOP,
};
use crate::simulation::CANVAS_WIDTH;

const PANEL_BACKGROUND: Color = Color::srgba(0.12, 0.16, 0.22, 0.9);
const MUTED: Color = Color::srgb(0.6, 0.64, 0.7);

/// System to setup the dashboard UI
pub fn setup_hud(mut commands: Commands) {
    // Title and counters across the top
    commands
        .spawn((Node {
            width: Val::Percent(100.0),
            height: Val::Auto,
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(FEED_LEFT),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(6.0),
            ..default()
        },))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Smart Wrong-Way Vehicle Detection System"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));

            parent
                .spawn((Node {
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(12.0),
                    ..default()
                },))
                .with_children(|row| {
                    spawn_stat_box(row, StatText::TotalVehicles, Color::srgb(0.38, 0.65, 0.98));
                    spawn_stat_box(row, StatText::WrongWay, Color::srgb(0.97, 0.44, 0.44));
                    spawn_stat_box(row, StatText::PlatesRead, Color::srgb(0.98, 0.8, 0.08));
                    spawn_stat_box(row, StatText::Accuracy, Color::srgb(0.29, 0.87, 0.5));
                    spawn_stat_box(row, StatText::Fps, Color::srgb(0.75, 0.52, 0.99));
                });
        });

    // Status line under the camera feed
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(FEED_LEFT),
            bottom: Val::Px(12.0),
            ..default()
        },
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(MUTED),
        PanelText::Status,
    ));

    // Side column
    commands
        .spawn((Node {
            width: Val::Px(500.0),
            position_type: PositionType::Absolute,
            top: Val::Px(FEED_TOP),
            left: Val::Px(FEED_LEFT + CANVAS_WIDTH + 20.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(10.0),
            ..default()
        },))
        .with_children(|parent| {
            spawn_panel(parent, "Active Detections", PanelText::ActiveDetections, Color::srgb(0.29, 0.87, 0.5));
            spawn_panel(parent, "Alert Log", PanelText::AlertLog, Color::srgb(0.97, 0.44, 0.44));
            spawn_panel(parent, "Recent Vehicle Detections", PanelText::RecentDetections, Color::srgb(0.38, 0.65, 0.98));
        });
}

fn spawn_stat_box(parent: &mut ChildSpawnerCommands, stat: StatText, color: Color) {
    parent
        .spawn((
            Node {
                width: Val::Px(130.0),
                padding: UiRect::all(Val::Px(8.0)),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(PANEL_BACKGROUND),
        ))
        .with_children(|cell| {
            cell.spawn((
                Text::new(stat_title(stat)),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(MUTED),
            ));
            cell.spawn((
                Text::new("0"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(color),
                stat,
            ));
        });
}

fn spawn_panel(parent: &mut ChildSpawnerCommands, title: &str, panel: PanelText, color: Color) {
    parent
        .spawn((
            Node {
                width: Val::Percent(100.0),
                padding: UiRect::all(Val::Px(8.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
            BackgroundColor(PANEL_BACKGROUND),
        ))
        .with_children(|panel_node| {
            panel_node.spawn((
                Text::new(title),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(color),
            ));
            panel_node.spawn((
                Text::new(""),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
                panel,
            ));
        });
}

fn stat_title(stat: StatText) -> &'static str {
    match stat {
        StatText::TotalVehicles => "Total Vehicles",
        StatText::WrongWay => "Wrong-Way",
        StatText::PlatesRead => "Plates Read",
        StatText::Accuracy => "Accuracy",
        StatText::Fps => "FPS",
    }
}

/// System to update the counters in the top bar
pub fn update_stat_text(
    sim_world: Res<SimWorldResource>,
    mut text_query: Query<(&StatText, &mut Text)>,
) {
    let stats = &sim_world.0.stats;

    for (stat, mut text) in text_query.iter_mut() {
        **text = match stat {
            StatText::TotalVehicles => stats.total_vehicles.to_string(),
            StatText::WrongWay => stats.wrong_way_vehicles.to_string(),
            StatText::PlatesRead => stats.plates_recognized.to_string(),
            StatText::Accuracy => format!("{}%", stats.accuracy),
            StatText::Fps => stats.fps.to_string(),
        };
    }
}

/// System to update the side panels and the status line
pub fn update_panel_text(
    sim_world: Res<SimWorldResource>,
    loop_ctx: Res<LoopResource>,
    mut text_query: Query<(&PanelText, &mut Text)>,
) {
    let world = &sim_world.0;

    for (panel, mut text) in text_query.iter_mut() {
        **text = match panel {
            PanelText::Status => format!(
                "{}  |  Space: start/pause  R: reset  E: export log  Esc: quit  |  YOLOv8 + DeepSORT + OCR",
                if loop_ctx.0.is_running() { "RUNNING" } else { "PAUSED" }
            ),
            PanelText::ActiveDetections => {
                if world.current_detections.is_empty() {
                    "No vehicles detected".to_string()
                } else {
                    world
                        .current_detections
                        .iter()
                        .map(|det| {
                            let plate = if det.plate == crate::simulation::PLATE_NOT_READ {
                                "Plate Not Read".to_string()
                            } else {
                                det.plate.clone()
                            };
                            format!(
                                "{:<9} {:>5.1}%  {}  {}",
                                det.kind_label(),
                                det.confidence * 100.0,
                                det.lane,
                                plate
                            )
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            }
            PanelText::AlertLog => {
                if world.alerts.is_empty() {
                    "No alerts generated".to_string()
                } else {
                    world
                        .alerts
                        .iter()
                        .map(|alert| {
                            format!(
                                "WRONG WAY  {}  {}  Plate: {}\n  {}",
                                alert.time, alert.lane, alert.plate, alert.action
                            )
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            }
            PanelText::RecentDetections => {
                if world.recent_detections.is_empty() {
                    "No detections yet. Press Space to start the simulation.".to_string()
                } else {
                    world
                        .recent_detections
                        .iter()
                        .map(|det| {
                            format!(
                                "{}  {:<5}  {:<7}  {:>5.1}%  {}",
                                det.time,
                                det.vehicle_type,
                                det.license_plate,
                                det.confidence * 100.0,
                                det.status
                            )
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            }
        };
    }
}
