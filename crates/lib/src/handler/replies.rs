//! Fixed reply payloads. Only the asset base URL varies per request.

use crate::line::{BaseSize, CarouselColumn, ImagemapAction, ImagemapArea, Message, Template, TemplateAction};

pub const LEAVING_ROOM: &str = "Leaving room";
pub const LEAVING_GROUP: &str = "Leaving group";
pub const CANNOT_LEAVE_USER_CHAT: &str = "Bot cannot leave from 1:1 chat";

pub const DIAGNOSIS_RESULT: &str =
    "ขณะนี้ ผลการวินิจฉัย ต้องให้แพทย์เป็นผู้ส่งไปทางอีเมลล์ที่ได้ลงทะเบียนไว้";

pub const HOSPITAL_LIST: &str = "โรงพยาบาล A เบอร์ติดต่อ 02-000-0000                   โรงพยาบาล B เบอร์ติดต่อ 02-111-1111                       โรงพยาบาล C เบอร์ติดต่อ 02-456-8795                   โรงพยาบาล D เบอร์ติดต่อ 02-789-4561";

pub const GLAUCOMA_RISK_FACTORS: &str = "ปัจจัยเสี่ยงของโรคต้อหินนั้น จะอบ่งออกเป็น 2 ลักษณะ คือ ต้อหินเฉียบพลัน กับ ต้อหินเรื้องรัง                                          ต้อหินเฉียบพลันจะมีปัจจัยเสี่ยงโดยคร่าวๆ ดังนี้                                           1. เป็นผู้หญิง                                                                                     2. เป็นผู้มีเชื้อสายเอเซีย                                                              3. อายุมากกว่า40ปี                                                               4. มีสายตายาว                                                               5. ครอบครัวมีประวัติเคยเป็นโรคนี้                                                               ต้อหินเรื้อรังจะมีปัจจัยเสี่ยงโดยคร่าวๆ ดังนี้                                                              1. มีเชื้อสายแอฟริกัน                                                              2. เป็นโรคเรื้อรังบางประเภท เช่น โรคหัวใจ โรคความดันโลหิตสูง                                                               3. เป็นโรคเบาหวาน                                                               4. มีสายตาสั้น                                                               5. ครอบครัวมีประวัติเคยเป็นโรคนี้                                                               6. ความดันลูกตาสูงผิดปกติ                                                               7. กระจกตาบางกว่าปกติ                                                               8. เคยได้รับการผ่าตัดดวงตา                                                               9. เคยได้รับการรักษาโรคเรื้อรังทางดวงตา                                                               10. เคยได้รับอุบัติเหตุทางตา                                                               11. เคยมีประวัติการใช้งานยาหยอดตาและยารับประทานบางชนิด โดยเฉพาะยาสเตียรอยด์                                                                ข้อมูลเพิ่มเติม : https://medthai.com/ต้อหิน/                                                                อ้างอิง : https://medthai.com/ต้อหิน/";

pub const APP_USAGE: &str = "ในการใช้งาน Glaucoma checker bot นั้น มีวิธีใช้งาน ดังนี้                                     1.หากต้องการตรวจสอบเบื้องต้นว่าเป็นโรคต้อหินหรือไม่ กรุณาถ่ายภาพดวงตาของท่านด้วยอุปกรณ์ แล้วอัพโหลดรูปลงในไลน์บอทนี้                                     2. หากบอทได้ตอบกลับว่า \"มีโอกาสเป็นโรค\" หรือ \"เป็นโรค\" กรุณากดที่ปุ่ม \"ขอรับ link กรอกข้อมูล\" เพื่อที่บอทจะดำเนินการส่ง link google form สำหรับกรอกข้อมูลให้กับท่าน                                          3. หากต้องการทราบรายชื่อและเบอร์ติดต่อโรงพยาบาลที่เกี่ยวข้อง กรุณากดที่ปุ่ม \"โรงพยาบาลที่เกี่ยวข้อง\"                                     4. หากต้องการรายละเอียดปัจจัยเสี่ยงของต้อหิน กรุณากดที่ปุ่ม \"ปัจจัยเสี่ยงของต้อหิน\"";

/// Sent for any text outside the command set.
pub const DEFAULT_REPLY: &str = "หากมีคำถาม หรือต้องการใช้บริการอะไร กรุณากดปุ่มใน App Menu หรือหากต้องการตรวจต้อหินเบื้องต้น กรุณาส่งรูปภาพ ขอบคุณครับ";

const BUTTONS_IMAGE: &[&str] = &["static", "buttons", "1040.jpg"];
const RICH_IMAGE_BASE: &[&str] = &["static", "rich"];

/// Join `base` (scheme://host[:port]) with path segments.
pub fn build_url(base: &str, segments: &[&str]) -> String {
    let base = base.trim_end_matches('/');
    if segments.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", base, segments.join("/"))
}

fn message_action(label: &str, text: &str) -> TemplateAction {
    TemplateAction::Message {
        label: label.to_string(),
        text: text.to_string(),
    }
}

fn postback_action(label: &str, data: &str) -> TemplateAction {
    TemplateAction::Postback {
        label: label.to_string(),
        data: data.to_string(),
    }
}

fn uri_action(label: &str, uri: &str) -> TemplateAction {
    TemplateAction::Uri {
        label: label.to_string(),
        uri: uri.to_string(),
    }
}

pub fn confirm() -> Message {
    Message::template(
        "Confirm alt text",
        Template::Confirm {
            text: "Do it?".to_string(),
            actions: vec![message_action("Yes", "Yes!"), message_action("No", "No!")],
        },
    )
}

pub fn buttons(base_url: &str) -> Message {
    Message::template(
        "Button alt text",
        Template::Buttons {
            thumbnail_image_url: Some(build_url(base_url, BUTTONS_IMAGE)),
            title: Some("My button sample".to_string()),
            text: "Hello my button".to_string(),
            actions: vec![
                uri_action("Go to line.me", "https://line.me"),
                postback_action("Buy", "action=buy&itemid=123"),
                postback_action("Add to cart", "action=add&itemid=123"),
                message_action("Say message", "hello hello"),
            ],
        },
    )
}

pub fn carousel(base_url: &str) -> Message {
    let image_url = build_url(base_url, BUTTONS_IMAGE);
    let column = |title: &str, text: &str, actions: Vec<TemplateAction>| CarouselColumn {
        thumbnail_image_url: Some(image_url.clone()),
        title: Some(title.to_string()),
        text: text.to_string(),
        actions,
    };
    Message::template(
        "Button alt text",
        Template::Carousel {
            columns: vec![
                column(
                    "foo",
                    "bar",
                    vec![
                        uri_action("Go to line.me", "https://line.me"),
                        postback_action("Buy", "action=buy&itemid=123"),
                    ],
                ),
                column(
                    "buz",
                    "qux",
                    vec![
                        postback_action("Add to cart", "action=add&itemid=123"),
                        message_action("Say message", "hello hello"),
                    ],
                ),
            ],
        },
    )
}

pub fn imagemap(base_url: &str) -> Message {
    let link = |uri: &str, area: ImagemapArea| ImagemapAction::Uri {
        link_uri: uri.to_string(),
        area,
    };
    Message::Imagemap {
        base_url: build_url(base_url, RICH_IMAGE_BASE),
        alt_text: "This is alt text".to_string(),
        base_size: BaseSize {
            width: 1040,
            height: 1040,
        },
        actions: vec![
            link("https://store.line.me/family/manga/en", ImagemapArea::new(0, 0, 520, 520)),
            link("https://store.line.me/family/music/en", ImagemapArea::new(520, 0, 520, 520)),
            link("https://store.line.me/family/play/en", ImagemapArea::new(0, 520, 520, 520)),
            ImagemapAction::Message {
                text: "URANAI!".to_string(),
                area: ImagemapArea::new(520, 520, 520, 520),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://bot.example.com";

    #[test]
    fn build_url_joins_segments() {
        assert_eq!(
            build_url("https://bot.example.com/", &["static", "rich"]),
            "https://bot.example.com/static/rich"
        );
        assert_eq!(build_url("http://localhost:8080", &[]), "http://localhost:8080");
    }

    #[test]
    fn every_builder_is_valid() {
        for msg in [confirm(), buttons(BASE), carousel(BASE), imagemap(BASE)] {
            assert_eq!(msg.validate(), Ok(()), "{:?}", msg);
        }
    }

    #[test]
    fn buttons_thumbnail_uses_base() {
        let Message::Template {
            template: Template::Buttons {
                thumbnail_image_url, ..
            },
            ..
        } = buttons(BASE)
        else {
            panic!("expected buttons template");
        };
        assert_eq!(
            thumbnail_image_url.as_deref(),
            Some("https://bot.example.com/static/buttons/1040.jpg")
        );
    }

    #[test]
    fn carousel_columns_share_thumbnail() {
        let Message::Template {
            alt_text,
            template: Template::Carousel { columns },
        } = carousel(BASE)
        else {
            panic!("expected carousel template");
        };
        assert_eq!(alt_text, "Button alt text");
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].title.as_deref(), Some("foo"));
        assert_eq!(columns[1].text, "qux");
        assert_eq!(columns[0].thumbnail_image_url, columns[1].thumbnail_image_url);
    }

    #[test]
    fn imagemap_covers_four_quadrants() {
        let Message::Imagemap {
            base_url,
            base_size,
            actions,
            ..
        } = imagemap(BASE)
        else {
            panic!("expected imagemap");
        };
        assert_eq!(base_url, "https://bot.example.com/static/rich");
        assert_eq!(base_size, BaseSize { width: 1040, height: 1040 });
        assert_eq!(actions.len(), 4);
        assert_eq!(
            actions[3],
            ImagemapAction::Message {
                text: "URANAI!".to_string(),
                area: ImagemapArea::new(520, 520, 520, 520),
            }
        );
    }

    #[test]
    fn confirm_json_matches_platform_shape() {
        let v = serde_json::to_value(confirm()).unwrap();
        assert_eq!(v["altText"], "Confirm alt text");
        assert_eq!(v["template"]["type"], "confirm");
        assert_eq!(v["template"]["actions"][1]["text"], "No!");
    }
}
