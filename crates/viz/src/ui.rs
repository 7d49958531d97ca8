//! egui overlays: region picker, sensor detail panel and terrain load status.

use bevy::prelude::*;
use bevy_egui::egui::{self, Color32};
use bevy_egui::{EguiContexts, EguiPrimaryContextPass};
use sensor_core::{DetailView, LoadPhase, Rgb};

use crate::terrain::TerrainLoad;
use crate::{Regions, Selection, SensorRng};

const PANEL_WIDTH: f32 = 280.0;
const TREND_HEIGHT: f32 = 64.0;

pub struct DashboardUiPlugin;

impl Plugin for DashboardUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DetailPanel>()
            .add_systems(Update, refresh_detail_panel)
            .add_systems(
                EguiPrimaryContextPass,
                (region_picker_ui, detail_panel_ui, load_status_ui),
            );
    }
}

#[derive(Resource, Default)]
/// Detail view of the active sensor, rebuilt whenever the selection changes.
struct DetailPanel {
    view: Option<DetailView>,
}

fn color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(
        (rgb.0 * 255.0).round() as u8,
        (rgb.1 * 255.0).round() as u8,
        (rgb.2 * 255.0).round() as u8,
    )
}

fn refresh_detail_panel(
    selection: Res<Selection>,
    mut rng: ResMut<SensorRng>,
    mut panel: ResMut<DetailPanel>,
) {
    if !selection.is_changed() {
        return;
    }
    panel.view = selection
        .0
        .active_sensor()
        .map(|sensor| DetailView::build(sensor, &mut rng.0));
}

fn region_picker_ui(
    mut contexts: EguiContexts,
    regions: Res<Regions>,
    mut selection: ResMut<Selection>,
    mut rng: ResMut<SensorRng>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    let current = selection.0.region_id().to_string();
    let current_name = regions
        .0
        .get(&current)
        .map(|region| region.display_name.clone())
        .unwrap_or_else(|_| current.clone());

    let mut picked = None;
    egui::Window::new("Region")
        .anchor(egui::Align2::LEFT_TOP, [12.0, 12.0])
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            egui::ComboBox::from_id_salt("region-picker")
                .selected_text(current_name)
                .show_ui(ui, |ui| {
                    for region in regions.0.regions() {
                        if ui
                            .selectable_label(region.id == current, &region.display_name)
                            .clicked()
                        {
                            picked = Some(region.id.clone());
                        }
                    }
                });
            ui.small(format!("{} sensors", selection.0.sensors().len()));
        });

    if let Some(id) = picked {
        match selection.0.select_region(&regions.0, &id, &mut rng.0) {
            Ok(()) => info!("selected region {id}"),
            Err(err) => warn!("region selection rejected: {err}"),
        }
    }
    Ok(())
}

fn detail_panel_ui(
    mut contexts: EguiContexts,
    panel: Res<DetailPanel>,
    mut selection: ResMut<Selection>,
) -> Result {
    let Some(view) = panel.view.as_ref() else {
        return Ok(());
    };
    let ctx = contexts.ctx_mut()?;

    let mut close = false;
    egui::SidePanel::right("sensor-detail")
        .resizable(false)
        .exact_width(PANEL_WIDTH)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(&view.title);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    close = ui.button("Close").clicked();
                });
            });
            ui.label(format!("Sensor #{}", view.sensor_id));
            ui.separator();

            egui::Grid::new("sensor-metrics")
                .num_columns(3)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    for row in &view.rows {
                        ui.label(row.icon.glyph());
                        ui.label(row.label);
                        ui.strong(&row.value);
                        ui.end_row();
                    }
                });
            ui.separator();

            let style = view.risk_style();
            egui::Frame::new()
                .fill(color32(style.badge_fill))
                .corner_radius(4.0)
                .inner_margin(6.0)
                .show(ui, |ui| {
                    ui.colored_label(color32(style.color), view.badge_text());
                });

            ui.add_space(8.0);
            ui.label("Trend");
            draw_trend(ui, &view.trend, color32(style.color));
        });

    if close {
        selection.0.clear_sensor();
    }
    Ok(())
}

fn draw_trend(ui: &mut egui::Ui, bars: &[f32], color: Color32) {
    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, TREND_HEIGHT), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let slot = rect.width() / bars.len() as f32;

    for (idx, height) in bars.iter().enumerate() {
        let fraction = (height / 100.0).clamp(0.0, 1.0);
        let left = rect.left() + slot * idx as f32 + slot * 0.15;
        let right = left + slot * 0.7;
        let top = rect.bottom() - rect.height() * fraction;
        painter.rect_filled(
            egui::Rect::from_min_max(egui::pos2(left, top), egui::pos2(right, rect.bottom())),
            2.0,
            color.gamma_multiply(0.8),
        );
    }
}

fn load_status_ui(mut contexts: EguiContexts, load: Res<TerrainLoad>) -> Result {
    let phase = load.phase();
    if !matches!(phase, LoadPhase::Pending | LoadPhase::Failed) {
        return Ok(());
    }
    let ctx = contexts.ctx_mut()?;

    match phase {
        LoadPhase::Pending => {
            egui::Area::new(egui::Id::new("terrain-loading"))
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading terrain…");
                    });
                });
        }
        _ => {
            egui::Area::new(egui::Id::new("terrain-failed"))
                .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -16.0])
                .show(ctx, |ui| {
                    ui.colored_label(
                        Color32::from_rgb(240, 180, 60),
                        "Terrain unavailable, showing flat ground",
                    );
                });
        }
    }
    Ok(())
}
