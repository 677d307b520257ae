//! Rules for the voice guide. Answers are short enough to be read aloud.

use crate::rules::RuleTable;

pub const GREETING: &str = "Hi! I'm your voice guide. Ask me about labs, tools, the learning path, or say 'help' for a quick tour.";

const PLATFORM_GUIDE: &str = "Welcome to CyberSec Academy! Here's a quick tour:

1. Start with Vulnerability Labs to learn about different attack types
2. Try Security Tools for hands-on practice
3. Follow the Learning Path for structured curriculum
4. Check your Progress to track achievements
5. Use the AI Assistant for detailed guidance

What would you like to explore first?";

const LABS: &str = "The Vulnerability Labs section contains 8 different types of attacks including SQL Injection, XSS, and more. Each lab opens a vulnerable store where you can practice exploitation techniques safely. Start with beginner labs and progress to advanced ones!";

const TOOLS: &str = "We have 6 security tools available: Nmap Scanner for network discovery, Wireshark for packet analysis, Encryption and Decryption tools, Hash Generator, and Password Analyzer. Click any tool to open it in full-screen mode for better experience!";

const LEARNING_PATH: &str = "The Learning Path provides a structured curriculum from beginner to advanced level. Each level contains multiple modules. Complete modules to unlock certifications and advance your skills!";

const PROGRESS: &str = "Track your achievements in the Progress section. You can see your total points, completed labs, current streak, and earned badges. Keep learning to unlock more achievements!";

const SQL_INJECTION: &str = "SQL Injection is when attackers manipulate database queries through user input. Try payloads like ' OR '1'='1 to bypass authentication. Always use parameterized queries in real applications!";

const XSS: &str = "Cross-Site Scripting lets attackers inject malicious scripts into web pages. Common payloads include script tags and event handlers. Remember to always validate and sanitize user input!";

const CONCEPTS: &str = "Ask me about specific topics like SQL Injection, XSS, tools, labs, or learning paths, and I'll explain them to you. Or say 'help' for a general guide!";

const GETTING_STARTED: &str = "Great! I recommend starting with the Vulnerability Labs. Click on the Vulnerability Labs tab, choose a beginner difficulty lab, and try exploiting it. The lab assistant will guide you through it!";

const FALLBACK: &str = "That's interesting! I can help you with questions about labs, tools, security concepts, or how to navigate the platform. What would you like to know?";

/// The voice guide's topics. Navigation help comes before security topics.
pub fn table() -> RuleTable {
    RuleTable::builder()
        .rule("platform-guide", ["help", "guide"], PLATFORM_GUIDE)
        .rule("labs", ["lab", "vulnerability"], LABS)
        .rule("tools", ["tool"], TOOLS)
        .rule("learning-path", ["learning", "path"], LEARNING_PATH)
        .rule("progress", ["progress"], PROGRESS)
        .rule("sql-injection", ["sql", "injection"], SQL_INJECTION)
        .rule("xss", ["xss"], XSS)
        .rule("concepts", ["how does", "what is"], CONCEPTS)
        .rule("getting-started", ["start"], GETTING_STARTED)
        .fallback("fallback", FALLBACK)
}
