//! Task descriptions sent to the provider
//!
//! Weekly sweeps cover the coming seven days and push hard for small
//! venues; daily sweeps cover today and the next three days. Both ask for
//! the same JSON array schema so one parser serves both.

use chrono::{DateTime, Local};

use crate::types::SearchType;

const OUTPUT_SCHEMA: &str = r#"OUTPUT FORMAT: answer with a JSON array only, no commentary.
Each element:
{
  "name": "Event name",
  "location": "Venue name",
  "address": "Full street address",
  "lat": 48.1374,
  "lng": 11.5755,
  "date": "YYYY-MM-DD",
  "time": "HH:MM",
  "endTime": "HH:MM",
  "capacity": 300,
  "type": "Concert/Theatre/Club/Comedy/Bar/Jazz/Sport/Fair/Festival/Poetry-Slam/Open-Mic/Other",
  "demand": "high|medium|low",
  "description": "One short sentence"
}"#;

const DEMAND_GUIDE: &str = r#"DEMAND means expected taxi passengers around the end of the event:
- "high": 10,000+ visitors, major matches/concerts/fairs, or any 500+ event ending within the next hour
- "medium": 500-10,000 visitors, popular clubs/bars/comedy/theatre, or events ending in 2-4 hours
- "low": under 500 visitors, or events later today / tomorrow that do not end soon
Raise demand one level for events ending after 22:00 and for events centred on alcohol.
Use real GPS coordinates for every venue."#;

const SEARCH_BUDGET: &str = r#"COST: use web search sparingly, at most 5-7 targeted searches
(city event calendars, large venues, nightlife, social event listings). Do not search every venue individually."#;

/// Build the task description for one refresh
pub fn build_prompt(search_type: SearchType, city: &str, now: DateTime<Local>) -> String {
    let today = now.format("%A, %d %B %Y");
    let time = now.format("%H:%M");

    let task = match search_type {
        SearchType::Weekly => format!(
            "TASK: find ALL events in {city} for the NEXT 7 DAYS (today through next week).\n\
             FOCUS ON SMALL EVENTS. Drivers already know the large ones; the value is in venues\n\
             with 50-500 guests: comedy in bars, poetry slams, jazz and blues sessions, live music,\n\
             open mic nights, pub quizzes, gallery openings, independent cinema, readings,\n\
             small theatres, underground club nights, food pop-ups.\n\
             Then mid-size venues (500-5,000). Mention large events (stadiums, fairs, arenas) briefly."
        ),
        SearchType::Daily => format!(
            "TASK: find current events in {city} for TODAY and the next 3 days.\n\
             Include new or changed listings: club nights, concerts, theatre, sport, fairs,\n\
             and small-venue events (comedy, jazz, open mic, readings)."
        ),
    };

    format!(
        "You are an event research assistant for taxi drivers in {city}.\n\n\
         TODAY: {today}, {time}\n\n\
         {task}\n\n\
         {SEARCH_BUDGET}\n\n\
         {DEMAND_GUIDE}\n\n\
         {OUTPUT_SCHEMA}"
    )
}
