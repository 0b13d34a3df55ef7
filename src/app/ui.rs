use super::card::{Card, CardAction, Preview};
use super::FileDropUploader;
use eframe::egui::{self, Align2, Color32, FontId, RichText, Sense, Stroke};

const DROP_ZONE_HEIGHT: f32 = 140.0;
const PREVIEW_HEIGHT: f32 = 150.0;

impl FileDropUploader {
    pub fn render(&mut self, ctx: &egui::Context) {
        let mut actions = Vec::new();
        let mut browse_clicked = false;
        let mut cloud_clicked = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(20.0);
            ui.vertical_centered(|ui| {
                ui.heading("File Uploader");
                ui.add_space(5.0);
                ui.label(
                    RichText::new("Drop files below or click to browse")
                        .color(ui.visuals().text_color().gamma_multiply(0.7)),
                );
            });
            ui.add_space(20.0);

            if self.cloud_enabled() {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.state.search_query)
                        .hint_text("Search files...")
                        .desired_width(f32::INFINITY),
                );
                if response.changed() {
                    self.apply_filter();
                }
                ui.add_space(10.0);
            }

            browse_clicked = self.render_drop_zone(ui);

            if self.cloud_enabled() {
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    let button = egui::Button::new("☁ Browse Cloud Storage")
                        .min_size(egui::vec2(200.0, 32.0));
                    cloud_clicked = ui.add(button).clicked();
                });
            }

            if self.state.is_uploading() {
                ui.add_space(15.0);
                self.render_progress(ui);
            }

            ui.add_space(20.0);
            if self.state.file_list.is_empty() && !self.state.is_uploading() {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new("No files uploaded yet")
                            .color(ui.visuals().text_color().gamma_multiply(0.5)),
                    );
                });
            }
            egui::ScrollArea::vertical().show(ui, |ui| {
                for card in self.state.file_list.visible_cards() {
                    Self::render_card(ui, card, &mut actions);
                    ui.add_space(6.0);
                }
            });
        });

        self.render_warning(ctx);

        if browse_clicked {
            self.browse_local();
        }
        if cloud_clicked {
            self.open_external_picker();
        }
        for action in actions {
            self.handle_card_action(action, ctx);
        }
    }

    /// Returns true when the zone was clicked.
    fn render_drop_zone(&self, ui: &mut egui::Ui) -> bool {
        let size = egui::vec2(ui.available_width(), DROP_ZONE_HEIGHT);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());
        let hovering = self.state.drag_hover;

        let visuals = if hovering || response.hovered() {
            ui.visuals().widgets.hovered
        } else {
            ui.visuals().widgets.inactive
        };
        ui.painter().rect(
            rect,
            8.0,
            if hovering {
                visuals.bg_fill.gamma_multiply(1.2)
            } else {
                visuals.bg_fill
            },
            visuals.bg_stroke,
        );
        if hovering {
            ui.painter().rect_stroke(rect, 8.0, Stroke::new(2.0, self.accent));
        }

        ui.painter().text(
            rect.center(),
            Align2::CENTER_CENTER,
            if hovering {
                "📥 Drop files to upload"
            } else {
                "📂 Drag & drop files here or click to browse"
            },
            FontId::proportional(15.0),
            if hovering {
                ui.visuals().strong_text_color()
            } else {
                ui.visuals().text_color()
            },
        );

        response.clicked()
    }

    fn render_progress(&self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            let progress_bar = egui::ProgressBar::new(self.state.get_progress_fraction())
                .show_percentage()
                .animate(false)
                .fill(self.accent);
            ui.add(progress_bar);
            ui.label(self.state.get_status_text());
        });
    }

    fn render_card(ui: &mut egui::Ui, card: &Card, actions: &mut Vec<CardAction>) {
        egui::Frame::group(ui.style())
            .fill(ui.style().visuals.extreme_bg_color)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(RichText::new(card.icon).size(28.0));
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&card.file_name).strong());
                        ui.label(
                            RichText::new(&card.meta)
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                        Self::render_preview(ui, &card.preview, actions);
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        for action in card.actions.iter().rev() {
                            let (label, color) = match action {
                                CardAction::Delete(_) => ("Delete", Color32::from_rgb(220, 50, 50)),
                                CardAction::View(_) => ("View", ui.visuals().text_color()),
                                CardAction::CopyLink(_) => ("Copy Link", ui.visuals().text_color()),
                            };
                            if ui.button(RichText::new(label).color(color)).clicked() {
                                actions.push(action.clone());
                            }
                        }
                    });
                });
            });
    }

    fn render_preview(ui: &mut egui::Ui, preview: &Preview, actions: &mut Vec<CardAction>) {
        match preview {
            Preview::None => {}
            Preview::Image(url) => {
                ui.add_space(4.0);
                let response = ui
                    .add(egui::Image::new(url.as_str()).max_height(PREVIEW_HEIGHT))
                    .interact(Sense::click())
                    .on_hover_text("Open full size");
                if response.clicked() {
                    actions.push(CardAction::View(url.clone()));
                }
            }
            Preview::Pdf(url) => {
                ui.add_space(4.0);
                egui::Frame::none()
                    .fill(ui.visuals().faint_bg_color)
                    .inner_margin(8.0)
                    .show(ui, |ui| {
                        ui.set_min_height(PREVIEW_HEIGHT / 3.0);
                        ui.label("📄 PDF document");
                        if ui.link("Open in viewer").clicked() {
                            actions.push(CardAction::View(url.clone()));
                        }
                    });
            }
        }
    }

    fn render_warning(&mut self, ctx: &egui::Context) {
        let Some(warning) = self.state.warnings.front().cloned() else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new("⚠ Warning")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(warning.as_str());
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.state.warnings.pop_front();
        }
    }
}
