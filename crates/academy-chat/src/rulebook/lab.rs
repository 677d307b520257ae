//! Rules for the lab assistant, one inner table per vulnerability lab.
//!
//! Every table shares the same sub-intent order: what/how, why/dangerous,
//! tool/payload, stuck/help. The what/how answer and the fallback are
//! specific to the lab; the other sub-intents are shared.

use crate::rules::{RuleTable, RuleTableBuilder};

/// A vulnerability lab the assistant knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabContext {
    /// Identifier used by the lesson content store.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    greeting: &'static str,
    walkthrough: &'static str,
    tips: &'static [&'static str],
}

impl LabContext {
    pub fn greeting(&self) -> &'static str {
        self.greeting
    }
}

pub const GLOBAL_GREETING: &str =
    "Hello! I'm your lab AI assistant. Ask me anything about exploiting this vulnerability!";

const GLOBAL_WALKTHROUGH: &str = "I can help you with exploiting this vulnerability!";

const WHY_DANGEROUS: &str = "This vulnerability is dangerous because:

• Attackers gain unauthorized access
• Data can be stolen or modified
• Complete system compromise possible
• User trust is violated
• Regulations (GDPR, etc.) may be triggered

Always practice ethically and with permission!";

const TOOL_PAYLOAD: &str = "Try these payloads:

Basic: ' OR '1'='1
Advanced: ' UNION SELECT * FROM users--
Commented: '; DROP TABLE users;--
Boolean: ' AND 1=1
Time-based: ' AND SLEEP(5)--

Start simple and escalate!";

const STUCK_HELP: &str = "Try these hints:

1. Look at how input is processed
2. Check the database error messages
3. Test with simple payloads first
4. Watch for reflections in responses
5. Use browser DevTools to inspect

Take your time and experiment safely!";

const GLOBAL_FALLBACK: &str = "That's a great question! Here are some tips:

• Experiment with different inputs
• Check for error messages
• Use browser DevTools (F12)
• Start with basic techniques
• Escalate to advanced methods

What specific challenge are you facing?";

pub const CONTEXTS: &[LabContext] = &[
    LabContext {
        id: "sql-injection",
        name: "SQL Injection",
        greeting: "I'm here to guide you through SQL Injection exploitation!

Tips:
• SQL queries use AND/OR operators to create conditions
• Try injection like: admin' --
• The -- comments out the rest of the query
• What specific aspect would you like help with?",
        walkthrough: "Great question! Here's how to exploit SQL injection:

1. Find the vulnerable parameter (usually search/login)
2. Try adding ' to break the query
3. Use OR operators: ' OR '1'='1
4. Comment out the rest: ' OR '1'='1'--
5. Extract data with UNION queries

Example payload: ' OR '1'='1'--

Want to try a specific technique?",
        tips: &[
            "Add a single quote (') and see whether the query breaks",
            "Change the logic with OR conditions like ' OR '1'='1",
            "Comment out the rest of the query with --",
            "Read error messages for hints about the query structure",
        ],
    },
    LabContext {
        id: "xss",
        name: "Cross-Site Scripting",
        greeting: "I'm your XSS exploitation guide!

Key concepts:
• XSS executes in the victim's browser
• Common payloads: <script>alert('XSS')</script>
• Try searching for: <img src=x onerror=alert('XSS')>
• How can I assist you?",
        walkthrough: "XSS exploitation steps:

1. Identify where user input is reflected
2. Try simple alert box: <script>alert('XSS')</script>
3. If blocked, try event handlers: <img onerror=alert('XSS')>
4. Use encoding: <img src=x onerror=\"alert('XSS')\">
5. Check if input is sanitized

Let's test your understanding!",
        tips: &[
            "Find where your input is reflected on the page",
            "Start with <script>alert('XSS')</script>",
            "If script tags are filtered, try event handlers like onerror",
            "Inspect how your input is rendered with DevTools (F12)",
        ],
    },
    LabContext {
        id: "auth-bypass",
        name: "Authentication Bypass",
        greeting: "Welcome to the Authentication Bypass lab!

Common techniques:
• SQL injection in login forms
• Default credentials (admin/admin)
• Weak password resets
• Try: admin' -- in the username field
• Need help with anything specific?",
        walkthrough: "Authentication bypass techniques:

1. Try default credentials (admin/admin)
2. SQL injection: admin' --
3. Boolean blind: ' OR '1'='1
4. Check password reset vulnerabilities
5. Look for session manipulation

Which method would you like to attempt?",
        tips: &[
            "Try default credentials such as admin/admin",
            "Inject into the username field: admin' --",
            "Walk through the password reset flow",
            "Watch how session cookies change after login",
        ],
    },
    LabContext {
        id: "broken-access",
        name: "Broken Access Control",
        greeting: "Let's explore Broken Access Control!

What to test:
• Can you access other users' profiles?
• Try modifying user IDs in URLs
• Check if you can access admin functions
• Look for parameter tampering opportunities
• Any questions?",
        walkthrough: "Test access control:

1. Log in with different users
2. Try accessing other user profiles
3. Modify IDs in URLs (1, 2, 3...)
4. Check API endpoints
5. Look for role-based access issues

Ready to test?",
        tips: &[
            "Change user IDs in URLs and parameters",
            "Compare what different users can see",
            "Request admin pages directly",
            "Look for data in API responses that you shouldn't see",
        ],
    },
    LabContext {
        id: "csrf",
        name: "CSRF",
        greeting: "CSRF exploitation guide here!

Key points:
• CSRF uses authenticated user's browser
• Create malicious forms on external sites
• No CSRF token validation = vulnerable
• Tokens must be regenerated per request
• What would you like to learn?",
        walkthrough: "CSRF exploitation:

1. Understand the vulnerable action
2. Create a malicious form
3. Host it on external site
4. Trick user into visiting
5. Action executes with their privileges

Let me know what action to target!",
        tips: &[
            "Find a state-changing action that has no CSRF token",
            "Recreate the request as an auto-submitting form",
            "Check whether SameSite cookies are enforced",
            "See whether tokens are tied to the session",
        ],
    },
    LabContext {
        id: "xxe",
        name: "XML External Entity",
        greeting: "XML External Entity injection lab!

Exploit techniques:
• Define external entities: <!DOCTYPE foo [<!ENTITY xxe SYSTEM \"file:///etc/passwd\">]>
• Use the entity in XML: &xxe;
• Can be used to read files or cause DoS
• Questions about XXE?",
        walkthrough: "XXE exploitation:

1. Find XML upload/parsing
2. Inject entity declaration
3. Reference the entity
4. Access local files
5. Can also cause XXE Bombs (DoS)

Ready to craft payload?",
        tips: &[
            "Find where XML is uploaded or parsed",
            "Declare an external entity in a DOCTYPE",
            "Reference the entity inside an element: &xxe;",
            "Watch responses for file contents or parser errors",
        ],
    },
    LabContext {
        id: "ssrf",
        name: "Server-Side Request Forgery",
        greeting: "Server-Side Request Forgery guide!

What to try:
• Make server request internal URLs
• Access services like: http://localhost:8080
• Try: http://127.0.0.1/admin
• Can bypass IP restrictions
• Need guidance?",
        walkthrough: "SSRF exploitation:

1. Find parameter that fetches URLs
2. Try localhost: http://localhost:8080
3. Try 127.0.0.1 addresses
4. Access internal services
5. Can scan internal network

Which service to target?",
        tips: &[
            "Find parameters that take a URL",
            "Point them at http://localhost or 127.0.0.1",
            "Try internal ports such as 8080",
            "Compare response times to map internal services",
        ],
    },
    LabContext {
        id: "deserialization",
        name: "Insecure Deserialization",
        greeting: "Insecure Deserialization lab!

Key concepts:
• Serialize and deserialize untrusted data
• Can lead to RCE (Remote Code Execution)
• Gadget chains enable exploitation
• Common in Java and .NET
• How can I help?",
        walkthrough: "Deserialization attacks:

1. Find serialized objects
2. Modify object properties
3. Create malicious gadget chains
4. Deserialize tampered object
5. Achieves RCE or privilege escalation

Any questions about this?",
        tips: &[
            "Look for serialized objects in cookies or parameters",
            "Decode them to see their structure",
            "Change properties such as role or isAdmin",
            "Research gadget chains for the platform in use",
        ],
    },
];

/// Look up a built-in lab by id.
pub fn find(id: &str) -> Option<&'static LabContext> {
    CONTEXTS.iter().find(|c| c.id == id)
}

fn shared(builder: RuleTableBuilder) -> RuleTableBuilder {
    builder
        .rule("why-dangerous", ["why", "dangerous"], WHY_DANGEROUS)
        .rule("tool-payload", ["tool", "payload"], TOOL_PAYLOAD)
        .rule("stuck-help", ["stuck", "help", "hint"], STUCK_HELP)
}

fn generic_for(context: &LabContext) -> String {
    let tips: Vec<String> = context.tips.iter().map(|t| format!("• {t}")).collect();
    format!(
        "That's a great question! Here are some tips for the {} lab:\n\n{}\n\nWhat specific challenge are you facing?",
        context.name,
        tips.join("\n")
    )
}

/// Inner table for one lab.
pub fn context_table(context: &LabContext) -> RuleTable {
    let builder = RuleTable::builder().rule("what-how", ["what", "how"], context.walkthrough);
    shared(builder).fallback("lab-generic", generic_for(context))
}

/// Table used when the active lab has no table of its own.
pub fn global_table() -> RuleTable {
    let builder = RuleTable::builder().rule("what-how", ["what", "how"], GLOBAL_WALKTHROUGH);
    shared(builder).fallback("generic", GLOBAL_FALLBACK)
}
