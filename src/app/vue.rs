// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand le champ est focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - DEG/RAD : ré-évalue le dernier programme sans re-tokeniser
// - Mémoire : MC / MR / M+ / M-

use calculatrice_sci::noyau::format::CHIFFRES_MAX;
use calculatrice_sci::noyau::{eval_expression, fonctions, ModeAngle};
use eframe::egui;
use tracing::warn;

use super::etat::{AppCalc, Demarche, DernierCalcul};

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice scientifique");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultat(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée :");

        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 2(3+4)^2, sin(30), nCr(5,2), Ans/2")
                .id_source("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // Enter évalue seulement si le champ est focus (ou vient de le perdre via Enter)
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if (resp.has_focus() || resp.lost_focus()) && enter {
            self.eval_via_noyau();
        }

        ui.add_space(6.0);

        // Actions + mode d’angle + précision
        ui.horizontal(|ui| {
            // Contrat: C = entrée seulement ; CLR = résultats seulement ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface résultat + erreur + démarche",
                Action::ClearResultats,
            );
            self.bouton_action(ui, "AC", "Remise à zéro totale (Ans, mémoire)", Action::ResetTotal);

            ui.separator();

            let mut mode = self.mode_angle;
            ui.selectable_value(&mut mode, ModeAngle::Degres, ModeAngle::Degres.libelle());
            ui.selectable_value(&mut mode, ModeAngle::Radians, ModeAngle::Radians.libelle());
            if mode != self.mode_angle {
                self.changer_mode_angle(mode);
            }

            ui.separator();

            let mut c = self.chiffres as u32;
            let resp = ui.add(
                egui::DragValue::new(&mut c)
                    .speed(1)
                    .range(1..=CHIFFRES_MAX as u32)
                    .suffix(" chiffres"),
            );
            if resp.changed() {
                self.set_chiffres(c as usize);
            }
        });

        ui.add_space(8.0);

        // Fonctions + constantes
        ui.horizontal_wrapped(|ui| {
            for nom in fonctions::noms_fonctions() {
                self.bouton_insert(ui, nom, &format!("{nom}("), InsertKind::Func);
            }

            ui.separator();

            self.bouton_insert(ui, "π", "pi", InsertKind::Word);
            self.bouton_insert(ui, "e", "e", InsertKind::Word);
            self.bouton_insert(ui, "Ans", "Ans", InsertKind::Word);
        });

        ui.add_space(8.0);

        ui.horizontal(|ui| {
            self.ui_pave_numerique(ui);
            ui.add_space(10.0);
            self.ui_memoire(ui);
        });

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique_sci")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "7", "7", InsertKind::Digit);
                self.bouton_insert(ui, "8", "8", InsertKind::Digit);
                self.bouton_insert(ui, "9", "9", InsertKind::Digit);
                self.bouton_insert(ui, "/", "/", InsertKind::Op);
                self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);
                ui.end_row();

                self.bouton_insert(ui, "4", "4", InsertKind::Digit);
                self.bouton_insert(ui, "5", "5", InsertKind::Digit);
                self.bouton_insert(ui, "6", "6", InsertKind::Digit);
                self.bouton_insert(ui, "*", "*", InsertKind::Op);
                self.bouton_insert(ui, "^", "^", InsertKind::Op);
                ui.end_row();

                self.bouton_insert(ui, "1", "1", InsertKind::Digit);
                self.bouton_insert(ui, "2", "2", InsertKind::Digit);
                self.bouton_insert(ui, "3", "3", InsertKind::Digit);
                self.bouton_insert(ui, "-", "-", InsertKind::Op);
                self.bouton_insert(ui, "%", "%", InsertKind::Op);
                ui.end_row();

                self.bouton_insert(ui, "0", "0", InsertKind::Digit);
                self.bouton_insert(ui, ".", ".", InsertKind::Digit);
                self.bouton_insert(ui, "!", "!", InsertKind::Digit);
                self.bouton_insert(ui, "+", "+", InsertKind::Op);
                self.bouton_insert(ui, ",", ", ", InsertKind::Digit);
                ui.end_row();

                self.bouton_insert(ui, "(", "(", InsertKind::OpenParen);
                self.bouton_insert(ui, ")", ")", InsertKind::CloseParen);
                ui.label("");
                ui.label("");
                let eq = ui.add_sized([46.0, 28.0], egui::Button::new("="));
                if eq.clicked() {
                    self.eval_via_noyau();
                }
                ui.end_row();
            });
    }

    fn ui_memoire(&mut self, ui: &mut egui::Ui) {
        ui.vertical(|ui| {
            self.bouton_action(ui, "MC", "Efface la mémoire", Action::MemoireEffacer);
            self.bouton_action(ui, "MR", "Insère la mémoire", Action::MemoireRappel);
            self.bouton_action(ui, "M+", "Ajoute l’entrée à la mémoire", Action::MemoirePlus);
            self.bouton_action(ui, "M-", "Retire l’entrée de la mémoire", Action::MemoireMoins);
            ui.monospace(format!("M = {}", self.texte_memoire()));
        });
    }

    /// Backspace “intelligent” : retire d’un coup les motifs utiles ("sin(", "Ans", etc.).
    fn backspace_entree(&mut self) {
        if self.entree.is_empty() {
            return;
        }

        // Retire espaces finaux
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }

        // Retire tokens connus (noms de fonction avec '(', constantes)
        let motifs = fonctions::noms_fonctions()
            .map(|nom| format!("{nom}("))
            .chain(["Ans", "pi"].map(String::from));
        for pat in motifs {
            if self.entree.ends_with(&pat) {
                for _ in 0..pat.chars().count() {
                    self.entree.pop();
                }
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                return;
            }
        }

        // Sinon : un caractère
        self.entree.pop();
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }
    }

    fn ui_resultat(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Résultat :");
            ui.weak(format!("({})", self.mode_angle.libelle()));
        });
        Self::champ_monospace(ui, "resultat_out", &self.resultat, 2);
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([46.0, 28.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
                Action::MemoireEffacer => self.memoire_effacer(),
                Action::MemoireRappel => {
                    let txt = self.texte_memoire();
                    self.inserer(&txt, InsertKind::Word);
                }
                Action::MemoirePlus => self.memoire_entree(1.0),
                Action::MemoireMoins => self.memoire_entree(-1.0),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if resp.clicked() && !to_insert.is_empty() {
            self.inserer(to_insert, kind);
        }
    }

    fn inserer(&mut self, to_insert: &str, kind: InsertKind) {
        match kind {
            InsertKind::CloseParen => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                self.entree.push_str(to_insert);
            }
            InsertKind::OpenParen | InsertKind::Func | InsertKind::Word => {
                // un mot collé à un identifiant précédent le prolongerait : "pi" + "e" = "pie"
                let last = self.entree.chars().next_back();
                if let Some(c) = last {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        self.entree.push(' ');
                    }
                }
                self.entree.push_str(to_insert);
            }
            InsertKind::Op => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                if !self.entree.is_empty() {
                    self.entree.push(' ');
                }
                self.entree.push_str(to_insert);
                self.entree.push(' ');
            }
            InsertKind::Digit => {
                // chiffres: pas d’espaces auto
                self.entree.push_str(to_insert);
            }
        }

        self.focus_entree = true;
    }

    /// Évalue l’expression via le noyau, puis dépose résultat + démarche dans l’état UI.
    fn eval_via_noyau(&mut self) {
        let ctx = self.contexte();

        match eval_expression(&self.entree, &ctx) {
            Ok((valeur, programme, d_noyau)) => {
                let d_ui = Demarche {
                    jetons: d_noyau.jetons,
                    rpn: d_noyau.rpn,
                };
                let dernier = DernierCalcul {
                    programme,
                    ans_utilise: ctx.ans,
                };
                self.set_resultat(valeur, d_ui, dernier);
            }
            Err(e) => {
                warn!(entree = %self.entree, erreur = %e, "évaluation refusée");
                self.set_erreur(e.to_string());
            }
        }
        self.focus_entree = true;
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
    MemoireEffacer,
    MemoireRappel,
    MemoirePlus,
    MemoireMoins,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Digit,
    Word,
    Func,
    Op,
    OpenParen,
    CloseParen,
}
