use crate::app::command_support::{
    map_page_err, parse_page_args, render_json, render_planned_request, router_for,
};
use crate::config::Settings;

const PLAN_USAGE: &str =
    "plan <route> [--server ip:port] [--layout name] [--file path] [--fresh]";
const LOAD_USAGE: &str =
    "load <route> [--server ip:port] [--layout name] [--file path] [--fresh]";

pub fn cmd_plan(args: &[String], settings: &Settings) -> Result<String, String> {
    let parsed = parse_page_args(args, PLAN_USAGE)?;
    let router = router_for(settings, parsed.page, &parsed.session);
    let request = router.plan(parsed.page).map_err(map_page_err)?;
    render_planned_request(&request)
}

pub fn cmd_load(args: &[String], settings: &Settings) -> Result<String, String> {
    let parsed = parse_page_args(args, LOAD_USAGE)?;
    let router = router_for(settings, parsed.page, &parsed.session);
    let data = router.visit(parsed.page).map_err(map_page_err)?;
    render_json(data.body())
}
