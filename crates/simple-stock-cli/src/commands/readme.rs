use simple_stock_core::{readme_page, RenderPlan};

pub fn run() -> RenderPlan {
    RenderPlan::Readme(readme_page())
}
