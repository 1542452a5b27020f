//! Canvas 2D drawing of frame snapshots
//!
//! Draw order: sky, ground, obstacles, player, clouds.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::{self, Circle};
use super::sprites::{self, PlayerLook, SpriteSheet};
use crate::sim::{CloudSnapshot, FrameSnapshot, ObstacleSnapshot, PlayerSnapshot};

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    sprites: SpriteSheet,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, wasm_bindgen::JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| wasm_bindgen::JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        Ok(Self {
            canvas,
            ctx,
            sprites: SpriteSheet::load(),
        })
    }

    pub fn draw(&self, frame: &FrameSnapshot, time_ms: f64) {
        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
        self.ctx.clear_rect(0.0, 0.0, w, h);

        self.draw_sky(w, h);
        self.draw_ground(frame.ground_y, w);
        for obstacle in &frame.obstacles {
            self.draw_obstacle(obstacle);
        }
        self.draw_player(&frame.player);
        for cloud in &frame.clouds {
            self.draw_cloud(cloud, time_ms);
        }
    }

    fn draw_sky(&self, w: f64, h: f64) {
        let gradient = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
        for (offset, color) in shapes::SKY_STOPS {
            gradient.add_color_stop(offset, color).ok();
        }
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, w, h);
    }

    fn draw_ground(&self, ground_y: f32, w: f64) {
        let band = shapes::ground_band(ground_y, w as f32);
        self.ctx.set_fill_style_str(shapes::GROUND_FILL);
        self.ctx
            .fill_rect(band.x as f64, band.y as f64, band.w as f64, band.h as f64);

        self.ctx.set_stroke_style_str(shapes::GROUND_EDGE);
        self.ctx.set_line_width(2.0);
        self.ctx.begin_path();
        self.ctx.move_to(0.0, band.y as f64);
        self.ctx.line_to(w, band.y as f64);
        self.ctx.stroke();
    }

    fn draw_obstacle(&self, o: &ObstacleSnapshot) {
        let (x, y, w, h) = (o.x as f64, o.y as f64, o.width as f64, o.height as f64);
        self.ctx.set_global_alpha(o.alpha as f64);

        match self.sprites.ready(sprites::obstacle_sprite(o)) {
            Some(img) => {
                self.ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h)
                    .ok();
            }
            None => {
                self.ctx.set_fill_style_str(sprites::obstacle_fallback_fill(o));
                self.ctx.fill_rect(x, y, w, h);
                self.ctx.set_stroke_style_str(sprites::BLOCK_STROKE);
                self.ctx.set_line_width(2.0);
                self.ctx.stroke_rect(x, y, w, h);
            }
        }

        self.ctx.set_global_alpha(1.0);
    }

    fn draw_player(&self, p: &PlayerSnapshot) {
        let (x, y, w, h) = (p.x as f64, p.y as f64, p.width as f64, p.height as f64);
        let look = sprites::player_look(p, |key| self.sprites.is_ready(key));

        if look == PlayerLook::Loading {
            self.ctx.set_fill_style_str(sprites::LOADING_FILL);
            self.ctx.fill_rect(x, y, w, h);
            self.ctx.set_fill_style_str("#FFF");
            self.ctx.set_font("8px Arial");
            self.ctx.set_text_align("center");
            self.ctx
                .fill_text(sprites::LOADING_TEXT, x + w / 2.0, y + h / 2.0)
                .ok();
            return;
        }

        self.ctx.save();
        self.ctx.translate(x + w / 2.0, y + h / 2.0).ok();
        self.ctx.rotate(p.rotation as f64).ok();
        self.ctx.scale(p.scale as f64, p.scale as f64).ok();

        match look {
            PlayerLook::Sprite(key) => {
                if let Some(img) = self.sprites.ready(key) {
                    self.ctx
                        .draw_image_with_html_image_element_and_dw_and_dh(
                            img,
                            -w / 2.0,
                            -h / 2.0,
                            w,
                            h,
                        )
                        .ok();
                }
            }
            PlayerLook::Tinted(fill) => {
                self.ctx.set_fill_style_str(fill);
                self.ctx.fill_rect(-w / 2.0, -h / 2.0, w, h);
            }
            PlayerLook::Loading => {}
        }

        self.ctx.restore();
    }

    fn draw_cloud(&self, cloud: &CloudSnapshot, time_ms: f64) {
        let x = cloud.x;
        let y = cloud.y + shapes::cloud_float_offset(time_ms, cloud.x);

        let Ok(gradient) = self.ctx.create_radial_gradient(
            x as f64,
            y as f64,
            0.0,
            x as f64,
            y as f64,
            (cloud.size * shapes::CLOUD_GLOW) as f64,
        ) else {
            return;
        };
        for (offset, color) in shapes::CLOUD_STOPS {
            gradient.add_color_stop(offset, color).ok();
        }

        let body = shapes::cloud_body(x, y, cloud.size);

        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.fill_circles(&body);

        self.ctx.set_fill_style_str(shapes::CLOUD_SHADOW);
        self.fill_circles(&shapes::cloud_shadow(x, y, cloud.size));

        // Body again so the shadow only shows at the rim
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.fill_circles(&body);
    }

    fn fill_circles(&self, circles: &[Circle]) {
        self.ctx.begin_path();
        for c in circles {
            self.ctx
                .arc(c.center.x as f64, c.center.y as f64, c.radius as f64, 0.0, TAU)
                .ok();
        }
        self.ctx.fill();
    }
}
